//! Canvas 2D rendering of a [`FrameData`].
//!
//! Spheres arrive sorted back to front and are shaded with a radial
//! gradient offset toward the light. Guide rings and the selection ring
//! arrive as pre-tessellated triangles.

use std::f64::consts::TAU;

use orrery_engine::{FrameData, SDFInstance};
use web_sys::CanvasRenderingContext2d;

const BACKGROUND: &str = "#05060f";
const LABEL_FONT: &str = "12px monospace";
const LABEL_COLOR: &str = "#e6e6e6";
/// Offset of the specular highlight, as a fraction of the radius.
const LIGHT_OFFSET: f64 = 0.35;

pub fn draw(ctx: &CanvasRenderingContext2d, frame: &FrameData, pixel_ratio: f64) {
    let _ = ctx.set_transform(pixel_ratio, 0.0, 0.0, pixel_ratio, 0.0, 0.0);
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, frame.viewport.x as f64, frame.viewport.y as f64);

    #[cfg(feature = "vectors")]
    draw_triangles(ctx, &frame.vector_vertices);

    for sphere in &frame.spheres {
        draw_sphere(ctx, sphere);
    }

    if let Some(marker) = &frame.selection {
        ctx.set_fill_style_str(LABEL_COLOR);
        ctx.set_font(LABEL_FONT);
        let _ = ctx.fill_text(
            &marker.name,
            (marker.center.x + marker.radius + 4.0) as f64,
            (marker.center.y + 4.0) as f64,
        );
    }
}

fn css_rgb(r: f32, g: f32, b: f32, scale: f32) -> String {
    let c = |v: f32| ((v * scale).clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("rgb({},{},{})", c(r), c(g), c(b))
}

fn draw_sphere(ctx: &CanvasRenderingContext2d, s: &SDFInstance) {
    if s.radius <= 0.0 {
        return;
    }
    let (x, y, r) = (s.x as f64, s.y as f64, s.radius as f64);
    let lift = 1.0 + 0.4 * s.highlight;

    if s.emissive > 0.0 {
        ctx.set_shadow_color(&css_rgb(s.r, s.g, s.b, 1.0));
        ctx.set_shadow_blur(r * s.emissive as f64);
    }

    let lit = css_rgb(s.r, s.g, s.b, (1.0 + s.emissive + s.shininess / 64.0) * lift);
    let base = css_rgb(s.r, s.g, s.b, 0.85 * lift);
    let shade = css_rgb(s.r, s.g, s.b, if s.emissive > 0.0 { 0.9 } else { 0.2 });

    match ctx.create_radial_gradient(
        x - r * LIGHT_OFFSET,
        y - r * LIGHT_OFFSET,
        r * 0.1,
        x,
        y,
        r,
    ) {
        Ok(gradient) => {
            let _ = gradient.add_color_stop(0.0, &lit);
            let _ = gradient.add_color_stop(0.6, &base);
            let _ = gradient.add_color_stop(1.0, &shade);
            ctx.set_fill_style_canvas_gradient(&gradient);
        }
        Err(_) => ctx.set_fill_style_str(&base),
    }

    ctx.begin_path();
    let _ = ctx.arc(x, y, r, 0.0, TAU);
    ctx.fill();

    if s.emissive > 0.0 {
        ctx.set_shadow_blur(0.0);
        ctx.set_shadow_color("transparent");
    }
}

/// Fill triangles, one path per run of identically colored vertices.
#[cfg(feature = "vectors")]
fn draw_triangles(ctx: &CanvasRenderingContext2d, vertices: &[orrery_engine::VectorVertex]) {
    let mut run_color: Option<[f32; 4]> = None;
    for tri in vertices.chunks_exact(3) {
        let color = [tri[0].r, tri[0].g, tri[0].b, tri[0].a];
        if run_color != Some(color) {
            if run_color.is_some() {
                ctx.fill();
            }
            ctx.set_fill_style_str(&format!(
                "rgba({},{},{},{})",
                (color[0].clamp(0.0, 1.0) * 255.0).round() as u8,
                (color[1].clamp(0.0, 1.0) * 255.0).round() as u8,
                (color[2].clamp(0.0, 1.0) * 255.0).round() as u8,
                color[3].clamp(0.0, 1.0),
            ));
            ctx.begin_path();
            run_color = Some(color);
        }
        ctx.move_to(tri[0].x as f64, tri[0].y as f64);
        ctx.line_to(tri[1].x as f64, tri[1].y as f64);
        ctx.line_to(tri[2].x as f64, tri[2].y as f64);
        ctx.close_path();
    }
    if run_color.is_some() {
        ctx.fill();
    }
}
