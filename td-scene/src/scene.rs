//! The fixed part list of the door scene.
//!
//! Parts are built once from a [`DoorLayout`]. Piece transforms inside a part
//! are fixed local offsets; animation is applied on top at draw time by
//! [`crate::FrameTransforms`].

use bevy::math::{Mat4, Vec3};
use bevy::prelude::Resource;
use tracing::debug;

use crate::config::DoorLayout;
use crate::mesh::{MeshData, box_mesh, textured_box_mesh};

pub const NUMBER_OF_DOORS: f32 = 2.0;

pub const FRAME_COLOR: [f32; 4] = [1.0, 0.42, 0.29, 1.0];
pub const INNER_FRAME_COLOR: [f32; 4] = [0.78, 0.33, 0.2, 1.0];
pub const DOOR_GLASS_COLOR: [f32; 4] = [0.6, 0.8, 1.0, 0.4];
pub const STRIP_COLOR: [f32; 4] = [0.92, 0.95, 1.0, 0.65];
pub const HANDLE_COLOR: [f32; 4] = [0.8, 0.8, 0.85, 1.0];
pub const WALL_COLOR: [f32; 4] = [0.86, 0.83, 0.76, 1.0];
pub const PANE_GLASS_COLOR: [f32; 4] = [0.7, 0.88, 1.0, 0.35];
pub const SASH_COLOR: [f32; 4] = [0.95, 0.95, 0.95, 1.0];
pub const FANLIGHT_COLOR: [f32; 4] = [0.75, 0.9, 1.0, 0.3];

// Declares one box piece of a part.
macro_rules! piece {
    (
        size: ($w:expr, $h:expr, $d:expr),
        at: ($x:expr, $y:expr, $z:expr),
        color: $color:expr,
        textured: $textured:expr $(,)?
    ) => {
        $crate::scene::PartPiece {
            mesh: if $textured {
                textured_box_mesh([$w, $h, $d], $color)
            } else {
                box_mesh([$w, $h, $d], $color)
            },
            local: Mat4::from_translation(Vec3::new($x, $y, $z)),
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PartId {
    OuterFrame,
    InnerFrame,
    Walls,
    GlassFrameTrim,
    LeftHandle,
    RightHandle,
    LeftGlassPane,
    RightGlassPane,
    OuterGlass,
    LeftDoor,
    LeftDoorStrips,
    RightDoor,
    RightDoorStrips,
}

impl PartId {
    pub const ALL: [Self; 13] = [
        Self::OuterFrame,
        Self::InnerFrame,
        Self::Walls,
        Self::GlassFrameTrim,
        Self::LeftHandle,
        Self::RightHandle,
        Self::LeftGlassPane,
        Self::RightGlassPane,
        Self::OuterGlass,
        Self::LeftDoor,
        Self::LeftDoorStrips,
        Self::RightDoor,
        Self::RightDoorStrips,
    ];

    /// Drawn first, in any order.
    pub const OPAQUE: [Self; 6] = [
        Self::OuterFrame,
        Self::InnerFrame,
        Self::Walls,
        Self::GlassFrameTrim,
        Self::LeftHandle,
        Self::RightHandle,
    ];

    /// Drawn last, exactly in this order.
    pub const TRANSPARENT_ORDER: [Self; 7] = [
        Self::LeftGlassPane,
        Self::RightGlassPane,
        Self::OuterGlass,
        Self::LeftDoor,
        Self::LeftDoorStrips,
        Self::RightDoor,
        Self::RightDoorStrips,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn is_transparent(self) -> bool {
        Self::TRANSPARENT_ORDER.contains(&self)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::OuterFrame => "outerFrame",
            Self::InnerFrame => "innerFrame",
            Self::Walls => "walls",
            Self::GlassFrameTrim => "glassFrameTrim",
            Self::LeftHandle => "leftHandle",
            Self::RightHandle => "rightHandle",
            Self::LeftGlassPane => "leftGlassPane",
            Self::RightGlassPane => "rightGlassPane",
            Self::OuterGlass => "outerGlass",
            Self::LeftDoor => "leftDoor",
            Self::LeftDoorStrips => "leftDoorStrips",
            Self::RightDoor => "rightDoor",
            Self::RightDoorStrips => "rightDoorStrips",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PartPiece {
    pub mesh: MeshData,
    pub local: Mat4,
}

#[derive(Debug, Clone)]
pub struct Part {
    pub id: PartId,
    pub pieces: Vec<PartPiece>,
}

/// Quantities derived from a [`DoorLayout`] with fixed formulas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorGeometry {
    pub inner_width: f32,
    pub door_width: f32,
    pub door_height: f32,
    pub door_center_y: f32,
    pub hinge_x_left: f32,
    pub hinge_x_right: f32,
    /// Handle center relative to the left hinge; the right handle mirrors it.
    pub handle_pos_x: f32,
    pub handle_pos_z: f32,
    pub handle_pivot_y: f32,
    pub window_bottom: f32,
    pub window_top: f32,
    pub mullion_width: f32,
    pub pane_width: f32,
    pub pane_height: f32,
    /// Distance from x = 0 to either pane's center.
    pub pane_center_x: f32,
    pub pane_hinge_y: f32,
}

impl DoorGeometry {
    pub fn from_layout(layout: &DoorLayout) -> Self {
        let ft = layout.frame_thickness;
        let inner_width = layout.total_width - 2.0 * ft;
        let door_width = inner_width / NUMBER_OF_DOORS;
        let opening_bottom = -layout.total_height / 2.0 + ft;
        let opening_top = layout.total_height / 2.0 - ft;
        let hinge_x = inner_width / 2.0 - layout.door_offset;

        let window_bottom = layout.total_height / 2.0;
        let window_top = window_bottom + layout.window_height - ft;
        let mullion_width = 2.0 * layout.sash_thickness;
        let pane_width = (inner_width - mullion_width) / 2.0;
        let pane_height = (window_top - window_bottom) - layout.fanlight_height;

        Self {
            inner_width,
            door_width,
            door_height: opening_top - opening_bottom,
            door_center_y: (opening_top + opening_bottom) / 2.0,
            hinge_x_left: -hinge_x,
            hinge_x_right: hinge_x,
            handle_pos_x: door_width - layout.handle_offset_from_edge,
            handle_pos_z: layout.door_thickness / 2.0 + layout.handle_offset_z,
            handle_pivot_y: layout.handle_pivot_offset_y,
            window_bottom,
            window_top,
            mullion_width,
            pane_width,
            pane_height,
            pane_center_x: (mullion_width + pane_width) / 2.0,
            pane_hinge_y: window_bottom + pane_height,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct SceneGraph {
    layout: DoorLayout,
    geometry: DoorGeometry,
    parts: Vec<Part>,
}

impl SceneGraph {
    pub fn build(layout: &DoorLayout) -> Self {
        let geometry = DoorGeometry::from_layout(layout);
        let parts = PartId::ALL
            .iter()
            .map(|&id| Part {
                id,
                pieces: build_pieces(id, layout, &geometry),
            })
            .collect::<Vec<_>>();

        debug!(
            parts = parts.len(),
            pieces = parts.iter().map(|p| p.pieces.len()).sum::<usize>(),
            door_width = geometry.door_width,
            "built door scene"
        );

        Self {
            layout: layout.clone(),
            geometry,
            parts,
        }
    }

    pub fn layout(&self) -> &DoorLayout {
        &self.layout
    }

    pub fn geometry(&self) -> &DoorGeometry {
        &self.geometry
    }

    pub fn part(&self, id: PartId) -> &Part {
        &self.parts[id.index()]
    }

    pub fn parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter()
    }

    pub fn piece_count(&self) -> usize {
        self.parts.iter().map(|p| p.pieces.len()).sum()
    }
}

fn build_pieces(id: PartId, l: &DoorLayout, g: &DoorGeometry) -> Vec<PartPiece> {
    let ft = l.frame_thickness;
    let w = l.total_width;
    let h = l.total_height;
    let wh = l.window_height;
    let fd = l.frame_depth;
    let iw = g.inner_width;

    match id {
        PartId::OuterFrame => {
            let post_x = w / 2.0 - ft / 2.0;
            vec![
                piece! { size: (iw, ft, fd), at: (0.0, h / 2.0 + wh - ft / 2.0, 0.0), color: FRAME_COLOR, textured: true },
                piece! { size: (iw, ft, fd), at: (0.0, -h / 2.0 + ft / 2.0, 0.0), color: FRAME_COLOR, textured: true },
                // Transom bar between the doors and the window.
                piece! { size: (iw, ft, fd), at: (0.0, h / 2.0 - ft / 2.0, 0.0), color: FRAME_COLOR, textured: true },
                piece! { size: (ft, h + wh, fd), at: (-post_x, wh / 2.0, 0.0), color: FRAME_COLOR, textured: true },
                piece! { size: (ft, h + wh, fd), at: (post_x, wh / 2.0, 0.0), color: FRAME_COLOR, textured: true },
            ]
        }
        PartId::InnerFrame => {
            // Door stops on the pull side of the panels.
            let t = l.inner_frame_thickness;
            let d = l.inner_frame_depth;
            let z = l.door_thickness / 2.0 + d / 2.0;
            let top = g.door_center_y + g.door_height / 2.0;
            let side_height = g.door_height - t;
            let side_y = top - t - side_height / 2.0;
            let side_x = iw / 2.0 - t / 2.0;
            vec![
                piece! { size: (iw, t, d), at: (0.0, top - t / 2.0, z), color: INNER_FRAME_COLOR, textured: true },
                piece! { size: (t, side_height, d), at: (-side_x, side_y, z), color: INNER_FRAME_COLOR, textured: true },
                piece! { size: (t, side_height, d), at: (side_x, side_y, z), color: INNER_FRAME_COLOR, textured: true },
            ]
        }
        PartId::Walls => {
            let x = w / 2.0 + l.wall_width / 2.0;
            vec![
                piece! { size: (l.wall_width, h + wh, l.wall_thickness), at: (-x, wh / 2.0, 0.0), color: WALL_COLOR, textured: true },
                piece! { size: (l.wall_width, h + wh, l.wall_thickness), at: (x, wh / 2.0, 0.0), color: WALL_COLOR, textured: true },
            ]
        }
        PartId::GlassFrameTrim => {
            let opening = g.window_top - g.window_bottom;
            let s = l.sash_thickness;
            vec![
                piece! { size: (g.mullion_width, opening, fd / 2.0), at: (0.0, g.window_bottom + opening / 2.0, 0.0), color: FRAME_COLOR, textured: false },
                piece! { size: (iw, s, s), at: (0.0, g.pane_hinge_y + s / 2.0, 0.0), color: FRAME_COLOR, textured: false },
            ]
        }
        PartId::LeftHandle | PartId::RightHandle => vec![
            piece! { size: (l.handle_width, l.handle_height, l.handle_depth), at: (0.0, 0.0, 0.0), color: HANDLE_COLOR, textured: false },
        ],
        PartId::LeftGlassPane => pane_pieces(l, g, -g.pane_center_x),
        PartId::RightGlassPane => pane_pieces(l, g, g.pane_center_x),
        PartId::OuterGlass => {
            let s = l.sash_thickness;
            let height = l.fanlight_height - s;
            let y = g.pane_hinge_y + s + height / 2.0;
            vec![
                piece! { size: (g.pane_width, height, l.glass_thickness), at: (-g.pane_center_x, y, 0.0), color: FANLIGHT_COLOR, textured: false },
                piece! { size: (g.pane_width, height, l.glass_thickness), at: (g.pane_center_x, y, 0.0), color: FANLIGHT_COLOR, textured: false },
            ]
        }
        PartId::LeftDoor | PartId::RightDoor => vec![
            piece! { size: (g.door_width, g.door_height, l.door_thickness), at: (0.0, 0.0, 0.0), color: DOOR_GLASS_COLOR, textured: true },
        ],
        PartId::LeftDoorStrips | PartId::RightDoorStrips => {
            let count = l.strip_count;
            let spacing = g.door_height / (count as f32 + 1.0);
            let width = g.door_width - 2.0 * l.strip_margin;
            let depth = l.door_thickness + 0.02;
            (0..count)
                .map(|i| {
                    let y = -g.door_height / 2.0 + spacing * (i as f32 + 1.0);
                    piece! { size: (width, l.strip_height, depth), at: (0.0, y, 0.0), color: STRIP_COLOR, textured: false }
                })
                .collect()
        }
    }
}

/// Glass plus its sash, positioned in world space before any tilt.
fn pane_pieces(l: &DoorLayout, g: &DoorGeometry, center_x: f32) -> Vec<PartPiece> {
    let s = l.sash_thickness;
    let pw = g.pane_width;
    let ph = g.pane_height;
    let cy = g.window_bottom + ph / 2.0;
    let side_x = pw / 2.0 - s / 2.0;
    vec![
        piece! { size: (pw - 2.0 * s, ph - 2.0 * s, l.glass_thickness), at: (center_x, cy, 0.0), color: PANE_GLASS_COLOR, textured: false },
        piece! { size: (pw, s, s), at: (center_x, cy + ph / 2.0 - s / 2.0, 0.0), color: SASH_COLOR, textured: false },
        piece! { size: (pw, s, s), at: (center_x, cy - ph / 2.0 + s / 2.0, 0.0), color: SASH_COLOR, textured: false },
        piece! { size: (s, ph - 2.0 * s, s), at: (center_x - side_x, cy, 0.0), color: SASH_COLOR, textured: false },
        piece! { size: (s, ph - 2.0 * s, s), at: (center_x + side_x, cy, 0.0), color: SASH_COLOR, textured: false },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn derived_geometry_follows_layout() {
        let layout = DoorLayout::default();
        let g = DoorGeometry::from_layout(&layout);
        assert!(approx(g.inner_width, 3.7));
        assert!(approx(g.door_width, 1.85));
        assert!(approx(g.door_height, 3.7));
        assert!(approx(g.door_center_y, 0.0));
        assert!(approx(g.hinge_x_left, -(1.85 - layout.door_offset)));
        assert!(approx(g.hinge_x_right, -g.hinge_x_left));
        assert!(approx(g.handle_pos_x, 1.85 - 0.3));
    }

    #[test]
    fn door_offset_is_tunable_without_touching_widths() {
        let layout = DoorLayout {
            door_offset: 0.2,
            ..DoorLayout::default()
        };
        let g = DoorGeometry::from_layout(&layout);
        assert!(approx(g.hinge_x_left, -(g.inner_width / 2.0 - 0.2)));
        assert!(approx(g.door_width, DoorGeometry::from_layout(&DoorLayout::default()).door_width));
    }

    #[test]
    fn every_part_is_built_once_and_well_formed() {
        let graph = SceneGraph::build(&DoorLayout::default());
        for id in PartId::ALL {
            let part = graph.part(id);
            assert_eq!(part.id, id);
            assert!(!part.pieces.is_empty(), "{} has no pieces", id.label());
            assert!(part.pieces.iter().all(|p| p.mesh.is_well_formed()));
        }
        assert_eq!(graph.part(PartId::LeftDoorStrips).pieces.len(), 5);
        assert_eq!(graph.part(PartId::RightDoorStrips).pieces.len(), 5);
    }

    #[test]
    fn opaque_and_transparent_sets_partition_parts() {
        for id in PartId::ALL {
            let opaque = PartId::OPAQUE.contains(&id);
            assert_ne!(opaque, id.is_transparent(), "{} must be in exactly one set", id.label());
        }
    }

    #[test]
    fn strips_are_spaced_inside_the_door() {
        let graph = SceneGraph::build(&DoorLayout::default());
        let half = graph.geometry().door_height / 2.0;
        let ys: Vec<f32> = graph
            .part(PartId::LeftDoorStrips)
            .pieces
            .iter()
            .map(|p| p.local.w_axis.y)
            .collect();
        assert!(ys.windows(2).all(|w| w[0] < w[1]));
        assert!(ys.iter().all(|y| y.abs() < half));
    }

    #[test]
    fn panes_hang_below_their_hinge() {
        let graph = SceneGraph::build(&DoorLayout::default());
        let g = *graph.geometry();
        for piece in &graph.part(PartId::LeftGlassPane).pieces {
            let y = piece.local.w_axis.y;
            assert!(y < g.pane_hinge_y && y > g.window_bottom);
        }
    }
}
