use std::{fmt::Write as _, fs, io, path};

use crate::{
    idx::{Idx, SliceExt},
    map::TrapezoidalMap,
    math::vertical_line_intersection,
    segment::IndexedSegment,
    debug,
};

struct View {
    x_min: f32,
    x_max: f32,
    y_min: f32,
    y_max: f32,
}

impl View {
    fn of(map: &TrapezoidalMap) -> Self {
        let bb = map.bounding_box();
        let margin_scale = 0.1;
        let w = (bb.max().x() - bb.min().x()) as f32;
        let h = (bb.max().y() - bb.min().y()) as f32;
        Self {
            x_min: bb.min().x() as f32 - w * margin_scale,
            x_max: bb.max().x() as f32 + w * margin_scale,
            y_min: bb.min().y() as f32 - h * margin_scale,
            y_max: bb.max().y() as f32 + h * margin_scale,
        }
    }

    fn percent(&self, p: f32) -> f32 {
        (self.x_max - self.x_min).min(self.y_max - self.y_min) * p / 100.0
    }
}

fn boundary_y(map: &TrapezoidalMap, seg: Option<Idx<IndexedSegment>>, x: f64, fallback: f64) -> f32 {
    match seg {
        Some(si) => vertical_line_intersection(&map.segment(si), x).y() as f32,
        None => fallback as f32,
    }
}

/// Renders the map as an SVG document: trapezoid walls in yellow, stored
/// segments in red, points in green, with index labels unless
/// `TRAPMAP_SVG_HIDE_LABELS` is set.
pub fn render_map(map: &TrapezoidalMap) -> String {
    use svg_fmt::*;

    let view = View::of(map);
    let show_labels = debug::env::svg::show_labels();
    let bb = map.bounding_box();

    let mut content = String::new();
    let _ = writeln!(
        content,
        "<svg viewBox=\"{}, {}, {}, {}\" xmlns=\"http://www.w3.org/2000/svg\">",
        view.x_min,
        view.y_min,
        view.x_max - view.x_min,
        view.y_max - view.y_min
    );

    let wall_width = view.percent(0.1);
    for ti in map.trapezoids().iter_index() {
        let t = map.trapezoid(ti);
        for pi in [t.left_pt(), t.right_pt()] {
            let x = map.point(pi).x();
            let y_top = boundary_y(map, t.top(), x, bb.max().y());
            let y_bottom = boundary_y(map, t.bottom(), x, bb.min().y());
            let _ = writeln!(
                content,
                "{}",
                line_segment(x as f32, y_bottom, x as f32, y_top)
                    .color(rgb(255, 255, 0))
                    .width(wall_width)
            );
        }
        if show_labels {
            let x = (map.point(t.left_pt()).x() + map.point(t.right_pt()).x()) / 2.0;
            let y = (boundary_y(map, t.top(), x, bb.max().y()) + boundary_y(map, t.bottom(), x, bb.min().y())) / 2.0;
            let _ = writeln!(
                content,
                "{}",
                text(x as f32, y, ti.to_string())
                    .color(black())
                    .align(Align::Center)
                    .size(view.percent(1.0))
            );
        }
    }

    let segment_width = view.percent(0.5);
    for si in map.segments().iter_index() {
        let s = map.segment(si);
        let _ = writeln!(
            content,
            "{}",
            line_segment(s.p1().x() as f32, s.p1().y() as f32, s.p2().x() as f32, s.p2().y() as f32)
                .color(red())
                .width(segment_width)
        );
    }

    let r = view.percent(0.5);
    for pi in map.points().iter_index() {
        let p = map.point(pi);
        let _ = writeln!(content, "{}", circle(p.x() as f32, p.y() as f32, r).fill(Fill::Color(green())));
        if show_labels {
            let gap = view.percent(1.0);
            let _ = writeln!(
                content,
                "{}",
                text(p.x() as f32 - gap, p.y() as f32, pi.to_string())
                    .color(black())
                    .align(Align::Right)
                    .size(view.percent(1.0))
            );
        }
    }

    let _ = writeln!(content, "</svg>");
    content
}

/// Writes [render_map]'s output under `TRAPMAP_SVG_OUTPUT_PATH` (or the
/// working directory when unset).
pub fn save_map<P: AsRef<path::Path>>(map: &TrapezoidalMap, file_name: P) -> io::Result<()> {
    let path = match debug::env::svg::output_path() {
        Some(dir) => dir.join(file_name),
        None => file_name.as_ref().to_path_buf(),
    };
    fs::write(path, render_map(map))
}

// svg_fmt is missing a function for Circle
fn circle(x: f32, y: f32, r: f32) -> svg_fmt::Circle {
    svg_fmt::Circle {
        x,
        y,
        radius: r,
        style: svg_fmt::Style::default(),
        comment: None,
    }
}
