//! Hand-built 2D meshes: plain discs, rings and vertex-coloured radial gradients.
//!
//! `ColorMaterial` multiplies its colour with per-vertex colours, so a
//! gradient mesh drawn with a white material shows the gradient as-is and can
//! be brightened by tinting the material.

use bevy::color::ColorToComponents;
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};
use std::f32::consts::TAU;

/// One colour stop of a radial gradient; `t` runs from 0 (centre) to 1 (edge).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub t: f32,
    pub color: Srgba,
}

impl GradientStop {
    pub const fn new(t: f32, color: Srgba) -> Self {
        Self { t, color }
    }
}

/// Filled disc of `radius` with a single colour (white unless tinted by the material).
pub fn disc_mesh(radius: f32, sides: u32) -> Mesh {
    gradient_disc_mesh(
        radius,
        sides,
        &[
            GradientStop::new(0.0, Srgba::WHITE),
            GradientStop::new(1.0, Srgba::WHITE),
        ],
    )
}

/// Disc whose colour interpolates through `stops` from the centre outward.
///
/// The disc is built as a centre fan plus one band of quads between each pair
/// of consecutive stops, so colour is exact at every stop radius.  `stops`
/// must start at `t = 0`; a lone stop is treated as a flat colour.
pub fn gradient_disc_mesh(radius: f32, sides: u32, stops: &[GradientStop]) -> Mesh {
    gradient_disc_mesh_offset(radius, sides, Vec2::ZERO, stops)
}

/// Like [`gradient_disc_mesh`], but the gradient's focal point is shifted by
/// `focus` (a fraction of `radius`), giving the off-centre highlight of a lit
/// sphere.  The outline is still a circle around the origin.
pub fn gradient_disc_mesh_offset(radius: f32, sides: u32, focus: Vec2, stops: &[GradientStop]) -> Mesh {
    let n = sides.max(3) as usize;
    let stops: Vec<GradientStop> = match stops {
        [] => vec![
            GradientStop::new(0.0, Srgba::WHITE),
            GradientStop::new(1.0, Srgba::WHITE),
        ],
        [only] => vec![GradientStop::new(0.0, only.color), GradientStop::new(1.0, only.color)],
        many => many.to_vec(),
    };
    let focal = focus * radius;

    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(1 + n * stops.len());
    let mut colors: Vec<[f32; 4]> = Vec::with_capacity(positions.capacity());

    // Centre vertex (stop 0).
    positions.push([focal.x, focal.y, 0.0]);
    colors.push(LinearRgba::from(stops[0].color).to_f32_array());

    // One ring per remaining stop; ring k lies between focal point and rim.
    for stop in &stops[1..] {
        let linear = LinearRgba::from(stop.color).to_f32_array();
        for i in 0..n {
            let rim = Vec2::from_angle(TAU * i as f32 / n as f32) * radius;
            let p = focal.lerp(rim, stop.t.clamp(0.0, 1.0));
            positions.push([p.x, p.y, 0.0]);
            colors.push(linear);
        }
    }

    let n32 = n as u32;
    let mut indices: Vec<u32> = Vec::new();
    // Fan from the centre to the first ring.
    for i in 0..n32 {
        indices.extend_from_slice(&[0, 1 + i, 1 + (i + 1) % n32]);
    }
    // Quads between ring k and ring k + 1.
    for k in 0..(stops.len() as u32).saturating_sub(2) {
        let inner = 1 + k * n32;
        let outer = inner + n32;
        for i in 0..n32 {
            let j = (i + 1) % n32;
            indices.extend_from_slice(&[inner + i, outer + i, outer + j]);
            indices.extend_from_slice(&[inner + i, outer + j, inner + j]);
        }
    }

    let count = positions.len();
    let uvs: Vec<[f32; 2]> = positions
        .iter()
        .map(|p| [p[0] / (2.0 * radius) + 0.5, p[1] / (2.0 * radius) + 0.5])
        .collect();

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, vec![[0.0, 0.0, 1.0]; count]);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Flat ring of the given `thickness` centred on `radius`.
pub fn ring_mesh(radius: f32, thickness: f32, sides: u32) -> Mesh {
    let n = sides.max(3);
    let inner_r = (radius - thickness * 0.5).max(0.0);
    let outer_r = radius + thickness * 0.5;

    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(2 * n as usize);
    for i in 0..n {
        let dir = Vec2::from_angle(TAU * i as f32 / n as f32);
        let a = dir * inner_r;
        let b = dir * outer_r;
        positions.push([a.x, a.y, 0.0]);
        positions.push([b.x, b.y, 0.0]);
    }

    let mut indices: Vec<u32> = Vec::with_capacity(6 * n as usize);
    for i in 0..n {
        let i0 = 2 * i;
        let o0 = i0 + 1;
        let i1 = (2 * (i + 1)) % (2 * n);
        let o1 = i1 + 1;
        indices.extend_from_slice(&[i0, o0, o1, i0, o1, i1]);
    }

    let count = positions.len();
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, vec![[0.0, 0.0, 1.0]; count]);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, vec![[0.5, 0.5]; count]);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}
