//! 計測セッションとホストを結びつける対話ツール。
//!
//! ホストから届くポインタイベントを受け取り、ピックした点をセッションに渡して、
//! 途中経過の図形・ステータス表示・確定ラベルをホストに描かせる。

use futures::{Stream, StreamExt};
use tracing::{debug, trace, warn};

use crate::{
    config::MeasureConfig,
    error::Error,
    format::hover_text,
    geometry::geo_point::GeoPoint,
    host::{EntityHandle, Host, Label, ScreenPosition},
    session::{Measure, MeasureKind, Measurement, Session, SessionState, Step},
};


/// ホストから届くポインタイベント。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Click(ScreenPosition),
    Move(ScreenPosition),
    DoubleClick(ScreenPosition),
}

/// 1つの計測セッションを対話的に進めるツール。
pub struct MeasureTool<M: Measure> {
    session: Session<M>,
    preview_entity: Option<EntityHandle>,
}

impl<M: Measure> MeasureTool<M> {
    pub fn start(config: MeasureConfig) -> Self {
        Self {
            session: Session::start(config),
            preview_entity: None,
        }
    }

    pub fn session(&self) -> &Session<M> {
        &self.session
    }

    pub fn kind(&self) -> MeasureKind {
        M::KIND
    }

    /// イベントを1つ処理する。計測が確定したら `Some` を返す。
    pub fn handle<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        event: PointerEvent,
    ) -> Result<Option<Measurement>, Error> {
        match event {
            PointerEvent::Click(position) => self.on_click(host, position),
            PointerEvent::Move(position) => {
                self.on_pointer_move(host, position)?;
                Ok(None)
            }
            PointerEvent::DoubleClick(_) => self.on_double_click(host),
        }
    }

    /// イベントの流れを確定まで処理する。
    ///
    /// 確定した時点で `events` を手放し、購読を終える。
    /// 確定前に流れが尽きるかエラーになったら、セッションを破棄して図形とステータス表示を消す。
    pub async fn run<H, S>(
        mut self,
        host: &mut H,
        events: S,
    ) -> Result<Option<Measurement>, Error>
    where
        H: Host + ?Sized,
        S: Stream<Item = PointerEvent>,
    {
        let mut events = std::pin::pin!(events);
        while let Some(event) = events.next().await {
            match self.handle(host, event) {
                Ok(Some(measurement)) => return Ok(Some(measurement)),
                Ok(None) => {}
                Err(e) => {
                    warn!(kind = %M::KIND, "measurement aborted: {}", e);
                    self.dispose(host);
                    return Err(e);
                }
            }
        }
        debug!(kind = %M::KIND, "event stream ended before the measurement was finalized");
        self.dispose(host);
        Ok(None)
    }

    /// 確定前にツールを終える。途中経過の図形とステータス表示を消す。
    pub fn dispose<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.session.dispose();
        self.clear_preview(host);
        host.hide();
    }

    fn pick<H: Host + ?Sized>(&self, host: &H, position: ScreenPosition) -> Option<GeoPoint> {
        let Some(ecef) = host.pick_surface_point(position) else {
            debug!(kind = %M::KIND, ?position, "pick missed the globe");
            return None;
        };
        match GeoPoint::from_ecef(ecef) {
            Ok(point) => Some(point),
            Err(e) => {
                warn!(kind = %M::KIND, ?position, "picked position ignored: {}", e);
                None
            }
        }
    }

    fn on_click<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        position: ScreenPosition,
    ) -> Result<Option<Measurement>, Error> {
        let Some(point) = self.pick(host, position) else {
            return Ok(None);
        };

        match self.session.on_commit(point)? {
            Step::Accumulating(result) => {
                if M::AUTO_FINALIZE_AT.is_none() {
                    let config = self.session.config();
                    host.show(&result.text(config), position.offset(config.status_offset()));
                }
                self.redraw_preview(host);
                Ok(None)
            }
            Step::Finalized(measurement) => {
                self.complete(host, &measurement);
                Ok(Some(measurement))
            }
        }
    }

    fn on_pointer_move<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        position: ScreenPosition,
    ) -> Result<(), Error> {
        let Some(point) = self.pick(host, position) else {
            return Ok(());
        };

        if self.session.on_move(point)? {
            self.redraw_preview(host);
        }

        let config = self.session.config();
        let labels = config.labels();
        let hint = match M::KIND {
            MeasureKind::Height => &labels.height_hint,
            MeasureKind::Distance | MeasureKind::Area => &labels.draw_hint,
        };
        host.show(&hover_text(&point, hint), position.offset(config.status_offset()));
        Ok(())
    }

    fn on_double_click<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> Result<Option<Measurement>, Error> {
        if M::AUTO_FINALIZE_AT.is_some() {
            trace!(kind = %M::KIND, "double click ignored");
            return Ok(None);
        }
        if self.session.state() == SessionState::Idle {
            debug!(kind = %M::KIND, "double click before the first point ignored");
            return Ok(None);
        }
        let measurement = self.session.on_finalize()?;
        self.complete(host, &measurement);
        Ok(Some(measurement))
    }

    /// プレビュー点を捨てた確定済みの図形とラベルを描き、ステータス表示を隠す。
    fn complete<H: Host + ?Sized>(&mut self, host: &mut H, measurement: &Measurement) {
        self.clear_preview(host);
        self.draw_outline(host, measurement.points());

        let config = self.session.config();
        let label = Label {
            text: measurement.result().label(config),
            pixel_offset: config.label_offset(),
        };
        host.draw_label(measurement.anchor(), &label);
        host.hide();
    }

    fn redraw_preview<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.clear_preview(host);
        let outline = self.session.outline();
        self.preview_entity = self.draw_outline(host, &outline);
    }

    fn clear_preview<H: Host + ?Sized>(&mut self, host: &mut H) {
        if let Some(handle) = self.preview_entity.take() {
            host.remove(handle);
        }
    }

    fn draw_outline<H: Host + ?Sized>(
        &self,
        host: &mut H,
        points: &[GeoPoint],
    ) -> Option<EntityHandle> {
        if points.len() < 2 {
            return None;
        }
        let handle = match M::KIND {
            MeasureKind::Area => host.draw_polygon(points),
            MeasureKind::Distance | MeasureKind::Height => host.draw_line(points),
        };
        Some(handle)
    }
}
