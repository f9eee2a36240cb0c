//! 計測セッションの状態機械。
//!
//! `Idle → Accumulating → Finalized` の順に遷移する。確定点とは別にプレビュー点を1つだけ持ち、
//! ポインタ移動ではプレビュー点だけを差し替えるので、確定済みの点列は変わらない。

use std::{fmt, marker::PhantomData};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    config::MeasureConfig, error::Error, format::MeasurementResult, geometry::geo_point::GeoPoint,
};

mod policy;

pub use policy::{Area, Distance, Height, Measure};

/// 計測の種類。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasureKind {
    Distance,
    Area,
    Height,
}

impl fmt::Display for MeasureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MeasureKind::Distance => "distance",
            MeasureKind::Area => "area",
            MeasureKind::Height => "height",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// まだ1点も確定していない
    Idle,
    /// 1点以上確定し、次の点または終了を待っている
    Accumulating,
    /// 終了した。以降の入力はエラーになる
    Finalized,
}

/// 確定した計測。
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    result: MeasurementResult,
    anchor: GeoPoint,
    points: Vec<GeoPoint>,
}

impl Measurement {
    pub fn result(&self) -> MeasurementResult {
        self.result
    }

    /// ラベルを置く点（最後に確定した点）。
    pub fn anchor(&self) -> &GeoPoint {
        &self.anchor
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }
}

/// 点を確定したあとの状態。
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// 計測を続ける。途中経過の計測値を持つ
    Accumulating(MeasurementResult),
    /// 確定点数に達して自動的に終了した
    Finalized(Measurement),
}

/// 1回分の計測セッション。
///
/// 点列はこのセッションだけが所有し、セッションの終了とともに破棄される。
pub struct Session<M: Measure> {
    state: SessionState,
    committed: Vec<GeoPoint>,
    preview: Option<GeoPoint>,
    value: f64,
    config: MeasureConfig,
    _policy: PhantomData<M>,
}

pub type DistanceSession = Session<Distance>;
pub type AreaSession = Session<Area>;
pub type HeightSession = Session<Height>;

impl<M: Measure> Session<M> {
    /// 新しいセッションを開始する。
    pub fn start(config: MeasureConfig) -> Self {
        debug!(kind = %M::KIND, "measurement session started");
        Self {
            state: SessionState::Idle,
            committed: Vec::new(),
            preview: None,
            value: 0.0,
            config,
            _policy: PhantomData,
        }
    }

    pub fn kind(&self) -> MeasureKind {
        M::KIND
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &MeasureConfig {
        &self.config
    }

    /// 確定済みの点列。
    pub fn committed(&self) -> &[GeoPoint] {
        &self.committed
    }

    pub fn preview(&self) -> Option<&GeoPoint> {
        self.preview.as_ref()
    }

    /// 描画用の点列。確定済みの点列の末尾にプレビュー点を加えたもの。
    pub fn outline(&self) -> Vec<GeoPoint> {
        self.committed.iter().chain(self.preview.iter()).copied().collect()
    }

    /// 最後に確定した時点の計測値。
    pub fn result(&self) -> MeasurementResult {
        MeasurementResult::new(M::KIND, self.value)
    }

    /// ポインタ移動。プレビュー点を差し替える。
    ///
    /// 1点目の確定前は差し替える対象が無いので何もせず `false` を返す。
    pub fn on_move(&mut self, point: GeoPoint) -> Result<bool, Error> {
        match self.state {
            SessionState::Finalized => Err(Error::SessionFinished { kind: M::KIND }),
            SessionState::Idle => Ok(false),
            SessionState::Accumulating => {
                trace!(kind = %M::KIND, ?point, "preview point moved");
                self.preview = Some(point);
                Ok(true)
            }
        }
    }

    /// 点を確定し、計測値を計算し直す。
    pub fn on_commit(&mut self, point: GeoPoint) -> Result<Step, Error> {
        if self.state == SessionState::Finalized {
            return Err(Error::SessionFinished { kind: M::KIND });
        }
        if self.state == SessionState::Idle {
            debug!(kind = %M::KIND, ?point, "first point committed");
            self.state = SessionState::Accumulating;
        }

        self.committed.push(point);
        self.preview = None;
        self.value = M::evaluate(&self.committed, &self.config);
        trace!(
            kind = %M::KIND,
            points = self.committed.len(),
            value = self.value,
            "running result"
        );

        if M::AUTO_FINALIZE_AT == Some(self.committed.len()) {
            return Ok(Step::Finalized(self.finish()));
        }
        Ok(Step::Accumulating(self.result()))
    }

    /// 終了の合図。プレビュー点を捨てて計測を確定する。
    ///
    /// ダブルクリックはその直前のクリックでも同じ点を確定させるので、
    /// 末尾の点が1つ前の点と同じならその1点も捨て、計測値を計算し直す。
    pub fn on_finalize(&mut self) -> Result<Measurement, Error> {
        if self.state == SessionState::Finalized {
            return Err(Error::SessionFinished { kind: M::KIND });
        }
        if M::AUTO_FINALIZE_AT.is_some() {
            return Err(Error::FinalizeNotSupported { kind: M::KIND });
        }
        if self.committed.is_empty() {
            return Err(Error::NothingToFinalize { kind: M::KIND });
        }
        let repeated =
            matches!(self.committed.as_slice(), [.., previous, last] if previous == last);
        if repeated {
            trace!(kind = %M::KIND, "dropping the point committed by the finalize click");
            self.committed.pop();
            self.value = M::evaluate(&self.committed, &self.config);
        }
        Ok(self.finish())
    }

    /// セッションを破棄する。確定していない点列も捨てる。
    pub fn dispose(&mut self) {
        debug!(kind = %M::KIND, state = ?self.state, "measurement session disposed");
        self.committed.clear();
        self.preview = None;
        self.state = SessionState::Finalized;
    }

    fn finish(&mut self) -> Measurement {
        self.preview = None;
        self.state = SessionState::Finalized;
        let measurement = Measurement {
            result: self.result(),
            // finish は確定点が1つ以上あるときだけ呼ばれる
            anchor: self.committed[self.committed.len() - 1],
            points: self.committed.clone(),
        };
        debug!(
            kind = %M::KIND,
            points = measurement.points.len(),
            value = self.value,
            "measurement finalized"
        );
        measurement
    }
}
