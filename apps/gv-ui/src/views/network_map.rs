use egui::{Color32, Pos2, Rect, Stroke, Vec2};
use gv_core::topology::{self, JunctionRole, MAP_HEIGHT, MAP_WIDTH};
use gv_core::RouteLabel;
use gv_views::RouteComparison;

use super::route_color32;

const ROAD_COLOR: Color32 = Color32::from_gray(70);
const JUNCTION_RADIUS: f32 = 9.0;

/// Schematic of the fixed road network with the three candidate routes.
///
/// The recommended route is drawn solid and on top; the others are dashed.
#[derive(Default)]
pub struct NetworkMap {
    show_labels: bool,
}

impl NetworkMap {
    pub fn show(&mut self, ui: &mut egui::Ui, comparison: &RouteComparison) {
        ui.checkbox(&mut self.show_labels, "Junction labels");

        let size = Vec2::new(MAP_WIDTH, MAP_HEIGHT);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
        let rect = response.rect;
        painter.rect_filled(rect, 4.0, Color32::from_gray(24));

        let to_screen = |x: f32, y: f32| map_to_screen(rect, x, y);

        for (from, to) in topology::EDGES {
            if let (Some(a), Some(b)) = (topology::junction(from), topology::junction(to)) {
                painter.line_segment(
                    [to_screen(a.x, a.y), to_screen(b.x, b.y)],
                    Stroke::new(6.0, ROAD_COLOR),
                );
            }
        }

        // Non-recommended routes first so the recommended one stays visible.
        let mut order: Vec<RouteLabel> = RouteLabel::ALL.to_vec();
        order.sort_by_key(|label| comparison.is_recommended(*label));

        for label in order {
            let points: Vec<Pos2> = topology::route_points(label)
                .into_iter()
                .map(|(x, y)| to_screen(x, y))
                .collect();
            let color = route_color32(label);
            if comparison.is_recommended(label) {
                painter.add(egui::Shape::line(points, Stroke::new(4.0, color)));
            } else {
                painter.extend(egui::Shape::dashed_line(
                    &points,
                    Stroke::new(2.0, color.gamma_multiply(0.7)),
                    8.0,
                    6.0,
                ));
            }
        }

        for junction in topology::JUNCTIONS {
            let center = to_screen(junction.x, junction.y);
            let fill = match topology::junction_role(junction.id) {
                JunctionRole::Entry => Color32::from_rgb(16, 185, 129),
                JunctionRole::Exit => Color32::from_rgb(239, 68, 68),
                JunctionRole::Inner => Color32::from_gray(150),
            };
            painter.circle(center, JUNCTION_RADIUS, fill, Stroke::new(1.5, Color32::WHITE));
            if self.show_labels {
                painter.text(
                    center + Vec2::new(0.0, -JUNCTION_RADIUS - 6.0),
                    egui::Align2::CENTER_BOTTOM,
                    junction.id,
                    egui::FontId::proportional(11.0),
                    Color32::LIGHT_GRAY,
                );
            }
        }

        self.draw_legend(&painter, rect, comparison);
    }

    fn draw_legend(&self, painter: &egui::Painter, rect: Rect, comparison: &RouteComparison) {
        let mut pos = rect.left_bottom() + Vec2::new(10.0, -10.0);
        for label in RouteLabel::ALL.iter().rev() {
            painter.text(
                pos,
                egui::Align2::LEFT_BOTTOM,
                comparison.legend_line(*label),
                egui::FontId::proportional(12.0),
                route_color32(*label),
            );
            pos.y -= 16.0;
        }
    }
}

fn map_to_screen(rect: Rect, x: f32, y: f32) -> Pos2 {
    let sx = rect.width() / MAP_WIDTH;
    let sy = rect.height() / MAP_HEIGHT;
    rect.min + Vec2::new(x * sx, y * sy)
}
