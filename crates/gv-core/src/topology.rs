//! Fixed road network drawn by the dashboard map.
//!
//! Configuration tables only. Coordinates are in map units with the origin at
//! the top-left corner, sized for a 560 x 400 canvas.

use crate::prediction::RouteLabel;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Junction {
    pub id: &'static str,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JunctionRole {
    Entry,
    Exit,
    Inner,
}

pub const MAP_WIDTH: f32 = 560.0;
pub const MAP_HEIGHT: f32 = 400.0;

pub const JUNCTIONS: [Junction; 12] = [
    Junction { id: "J1", x: 100.0, y: 80.0 },
    Junction { id: "J2", x: 280.0, y: 80.0 },
    Junction { id: "J3", x: 460.0, y: 80.0 },
    Junction { id: "J4", x: 100.0, y: 200.0 },
    Junction { id: "J5", x: 280.0, y: 200.0 },
    Junction { id: "J6", x: 460.0, y: 200.0 },
    Junction { id: "J7", x: 100.0, y: 320.0 },
    Junction { id: "J8", x: 280.0, y: 320.0 },
    Junction { id: "J9", x: 460.0, y: 320.0 },
    Junction { id: "S1", x: 10.0, y: 80.0 },
    Junction { id: "D1", x: 550.0, y: 80.0 },
    Junction { id: "D2", x: 550.0, y: 320.0 },
];

/// Undirected grid edges, as junction id pairs.
pub const EDGES: [(&str, &str); 15] = [
    ("J1", "J2"),
    ("J2", "J3"),
    ("J4", "J5"),
    ("J5", "J6"),
    ("J7", "J8"),
    ("J8", "J9"),
    ("J1", "J4"),
    ("J4", "J7"),
    ("J2", "J5"),
    ("J5", "J8"),
    ("J3", "J6"),
    ("J6", "J9"),
    ("S1", "J1"),
    ("J3", "D1"),
    ("J9", "D2"),
];

const ROUTE_A: &[&str] = &["S1", "J1", "J2", "J3", "D1"];
const ROUTE_B: &[&str] = &["S1", "J1", "J4", "J5", "J6", "J3", "D1"];
const ROUTE_C: &[&str] = &["S1", "J1", "J4", "J7", "J8", "J9", "J6", "J3", "D1"];

pub fn junction(id: &str) -> Option<&'static Junction> {
    JUNCTIONS.iter().find(|j| j.id == id)
}

pub fn junction_role(id: &str) -> JunctionRole {
    match id {
        "S1" => JunctionRole::Entry,
        "D1" | "D2" => JunctionRole::Exit,
        _ => JunctionRole::Inner,
    }
}

/// Ordered junction ids a route passes through.
pub fn route_path(label: RouteLabel) -> &'static [&'static str] {
    match label {
        RouteLabel::A => ROUTE_A,
        RouteLabel::B => ROUTE_B,
        RouteLabel::C => ROUTE_C,
    }
}

/// Polyline of a route in map coordinates.
pub fn route_points(label: RouteLabel) -> Vec<(f32, f32)> {
    route_path(label)
        .iter()
        .filter_map(|id| junction(id))
        .map(|j| (j.x, j.y))
        .collect()
}

/// Road edge ids (`FROM_TO`) a route travels, in order.
pub fn route_edge_ids(label: RouteLabel) -> Vec<String> {
    route_path(label)
        .windows(2)
        .map(|pair| format!("{}_{}", pair[0], pair[1]))
        .collect()
}

/// "S1→J1→J2→J3→D1"
pub fn route_description(label: RouteLabel) -> String {
    route_path(label).join("→")
}

pub fn route_name(label: RouteLabel) -> &'static str {
    match label {
        RouteLabel::A => "Highway Direct",
        RouteLabel::B => "City Road",
        RouteLabel::C => "Local Street",
    }
}

/// Display color as RGB.
pub fn route_color(label: RouteLabel) -> [u8; 3] {
    match label {
        RouteLabel::A => [0x3b, 0x82, 0xf6],
        RouteLabel::B => [0xf5, 0x9e, 0x0b],
        RouteLabel::C => [0x10, 0xb9, 0x81],
    }
}
