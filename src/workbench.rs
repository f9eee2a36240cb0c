use futures::{Stream, StreamExt};
use tracing::{debug, info, warn};

use crate::{
    config::MeasureConfig,
    error::Error,
    host::{Host, TerrainKind},
    session::{Area, Distance, Height, MeasureKind, Measurement},
    tool::{MeasureTool, PointerEvent},
};

/// 実行中の計測ツール。
enum ActiveTool {
    Distance(MeasureTool<Distance>),
    Area(MeasureTool<Area>),
    Height(MeasureTool<Height>),
}

impl ActiveTool {
    fn start(kind: MeasureKind, config: MeasureConfig) -> Self {
        match kind {
            MeasureKind::Distance => ActiveTool::Distance(MeasureTool::start(config)),
            MeasureKind::Area => ActiveTool::Area(MeasureTool::start(config)),
            MeasureKind::Height => ActiveTool::Height(MeasureTool::start(config)),
        }
    }

    fn kind(&self) -> MeasureKind {
        match self {
            ActiveTool::Distance(tool) => tool.kind(),
            ActiveTool::Area(tool) => tool.kind(),
            ActiveTool::Height(tool) => tool.kind(),
        }
    }

    fn handle<H: Host>(
        &mut self,
        host: &mut H,
        event: PointerEvent,
    ) -> Result<Option<Measurement>, Error> {
        match self {
            ActiveTool::Distance(tool) => tool.handle(host, event),
            ActiveTool::Area(tool) => tool.handle(host, event),
            ActiveTool::Height(tool) => tool.handle(host, event),
        }
    }

    fn dispose<H: Host>(&mut self, host: &mut H) {
        match self {
            ActiveTool::Distance(tool) => tool.dispose(host),
            ActiveTool::Area(tool) => tool.dispose(host),
            ActiveTool::Height(tool) => tool.dispose(host),
        }
    }
}

/// ホストを所有し、同時に1つだけ計測ツールを動かす。
///
/// ツールの実行中に別のツールを開始しようとするとエラーになる。
pub struct Workbench<H: Host> {
    host: H,
    config: MeasureConfig,
    active: Option<ActiveTool>,
}

impl<H: Host> Workbench<H> {
    pub fn new(host: H, config: MeasureConfig) -> Self {
        info!("measurement workbench ready");
        Self {
            host,
            config,
            active: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// 実行中のツールの種類。
    pub fn active_kind(&self) -> Option<MeasureKind> {
        self.active.as_ref().map(ActiveTool::kind)
    }

    pub fn measure_distance(&mut self) -> Result<(), Error> {
        self.start(MeasureKind::Distance)
    }

    pub fn measure_area(&mut self) -> Result<(), Error> {
        self.start(MeasureKind::Area)
    }

    pub fn measure_height(&mut self) -> Result<(), Error> {
        self.start(MeasureKind::Height)
    }

    pub fn start(&mut self, kind: MeasureKind) -> Result<(), Error> {
        if let Some(active) = self.active_kind() {
            warn!(%active, requested = %kind, "measurement tool already active");
            return Err(Error::ToolAlreadyActive {
                active,
                requested: kind,
            });
        }
        self.active = Some(ActiveTool::start(kind, self.config.clone()));
        Ok(())
    }

    /// 実行中のツールを確定させずに終える。
    pub fn cancel(&mut self) {
        if let Some(mut tool) = self.active.take() {
            debug!(kind = %tool.kind(), "measurement tool cancelled");
            tool.dispose(&mut self.host);
        }
    }

    /// イベントを実行中のツールに渡す。計測が確定したらツールを解放して `Some` を返す。
    pub fn handle(&mut self, event: PointerEvent) -> Result<Option<Measurement>, Error> {
        let Some(tool) = self.active.as_mut() else {
            return Err(Error::NoActiveTool);
        };
        let measurement = tool.handle(&mut self.host, event)?;
        if measurement.is_some() {
            self.active = None;
        }
        Ok(measurement)
    }

    /// イベントの流れを、実行中のツールが確定するまで処理する。
    pub async fn run<S>(&mut self, events: S) -> Result<Option<Measurement>, Error>
    where
        S: Stream<Item = PointerEvent>,
    {
        if self.active.is_none() {
            return Err(Error::NoActiveTool);
        }
        let mut events = std::pin::pin!(events);
        while let Some(event) = events.next().await {
            match self.handle(event) {
                Ok(Some(measurement)) => return Ok(Some(measurement)),
                Ok(None) => {}
                Err(e) => {
                    self.cancel();
                    return Err(e);
                }
            }
        }
        self.cancel();
        Ok(None)
    }

    /// シーン上のエンティティをすべて消す。
    pub fn clear_entities(&mut self) {
        self.host.remove_all();
    }

    /// 地形を起伏の無い楕円体にする。
    pub fn load_terrain(&mut self) {
        self.host.set_terrain_provider(TerrainKind::Ellipsoid);
    }
}
