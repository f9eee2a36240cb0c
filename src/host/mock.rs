use std::collections::BTreeMap;

use crate::{
    geometry::{coordinate::Coordinate, ecef::Ecef, geo_point::GeoPoint},
    host::{EntityHandle, Label, Scene, ScreenPosition, StatusDisplay, SurfacePicker, TerrainKind},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Line(Vec<GeoPoint>),
    Polygon(Vec<GeoPoint>),
    Label(GeoPoint, Label),
}

/// テスト用のホスト。登録した画面座標だけがピックに成功する。
#[derive(Debug, Default)]
pub struct MockHost {
    surface: Vec<(ScreenPosition, Ecef)>,
    next_id: u64,
    pub entities: BTreeMap<EntityHandle, Entity>,
    pub status: Option<(String, ScreenPosition)>,
    pub terrain: Option<TerrainKind>,
}

impl MockHost {
    pub fn with_surface(mut self, x: f64, y: f64, lon: f64, lat: f64, height: f64) -> Self {
        let coordinate = Coordinate::new(lat, lon, height).unwrap();
        self.surface.push((ScreenPosition::new(x, y), coordinate.into()));
        self
    }

    pub fn lines(&self) -> Vec<&Vec<GeoPoint>> {
        self.entities
            .values()
            .filter_map(|e| match e {
                Entity::Line(points) => Some(points),
                _ => None,
            })
            .collect()
    }

    pub fn polygons(&self) -> Vec<&Vec<GeoPoint>> {
        self.entities
            .values()
            .filter_map(|e| match e {
                Entity::Polygon(points) => Some(points),
                _ => None,
            })
            .collect()
    }

    pub fn labels(&self) -> Vec<&Label> {
        self.entities
            .values()
            .filter_map(|e| match e {
                Entity::Label(_, label) => Some(label),
                _ => None,
            })
            .collect()
    }

    fn add(&mut self, entity: Entity) -> EntityHandle {
        self.next_id += 1;
        let handle = EntityHandle(self.next_id);
        self.entities.insert(handle, entity);
        handle
    }
}

impl SurfacePicker for MockHost {
    fn pick_surface_point(&self, position: ScreenPosition) -> Option<Ecef> {
        self.surface
            .iter()
            .find(|(p, _)| *p == position)
            .map(|(_, ecef)| *ecef)
    }
}

impl Scene for MockHost {
    fn draw_line(&mut self, points: &[GeoPoint]) -> EntityHandle {
        self.add(Entity::Line(points.to_vec()))
    }

    fn draw_polygon(&mut self, points: &[GeoPoint]) -> EntityHandle {
        self.add(Entity::Polygon(points.to_vec()))
    }

    fn draw_label(&mut self, at: &GeoPoint, label: &Label) -> EntityHandle {
        self.add(Entity::Label(*at, label.clone()))
    }

    fn remove(&mut self, handle: EntityHandle) {
        self.entities.remove(&handle);
    }

    fn remove_all(&mut self) {
        self.entities.clear();
    }

    fn set_terrain_provider(&mut self, terrain: TerrainKind) {
        self.terrain = Some(terrain);
    }
}

impl StatusDisplay for MockHost {
    fn show(&mut self, text: &str, at: ScreenPosition) {
        self.status = Some((text.to_string(), at));
    }

    fn hide(&mut self) {
        self.status = None;
    }
}
