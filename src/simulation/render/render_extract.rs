use serde::Serialize;

use crate::domain::segment::SegmentKind;
use crate::systems::engine::PhysicsBackend;

use super::SessionCore;

/// Floats per record in the flat pose buffer.
pub const POSE_STRIDE: usize = 6;

/// One sprite the presentation layer draws this frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Drawable {
    pub segment: SegmentKind,
    pub asset: &'static str,
    pub z_order: i32,
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub half_width: f32,
    pub half_height: f32,
}

pub(super) fn draw_list<B: PhysicsBackend>(session: &SessionCore<B>) -> Vec<Drawable> {
    let mut list: Vec<Drawable> = session
        .rig
        .segments()
        .iter()
        .filter_map(|segment| {
            let pose = session.backend.pose(segment.body())?;
            let kind = segment.kind();
            Some(Drawable {
                segment: kind,
                asset: kind.asset(),
                z_order: kind.z_order(),
                x: pose.position.x,
                y: pose.position.y,
                angle: pose.angle,
                half_width: segment.half_width(),
                half_height: segment.half_height(),
            })
        })
        .collect();

    list.sort_by_key(|d| d.z_order);
    list
}

pub(super) fn draw_list_json<B: PhysicsBackend>(session: &SessionCore<B>) -> String {
    serde_json::to_string(&draw_list(session)).unwrap_or_else(|_| "[]".to_string())
}

pub(super) fn pose_buffer<B: PhysicsBackend>(session: &SessionCore<B>) -> Vec<f32> {
    let list = draw_list(session);
    let mut buffer = Vec::with_capacity(list.len() * POSE_STRIDE);
    for d in &list {
        buffer.extend_from_slice(&[d.z_order as f32, d.x, d.y, d.angle, d.half_width, d.half_height]);
    }
    buffer
}
