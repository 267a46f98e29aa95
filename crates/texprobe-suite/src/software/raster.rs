//! Edge-function triangle rasterization, sampled at pixel centres.

use texprobe_gen::Vertex;

/// Framebuffer pixels per canvas unit.
pub const PIXELS_PER_UNIT: f32 = 100.0;

/// Maps canvas units (origin at the centre, y up) to framebuffer pixels (origin top-left).
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn to_pixels(&self, [x, y]: [f32; 2]) -> [f32; 2] {
        [
            self.width as f32 * 0.5 + x * PIXELS_PER_UNIT,
            self.height as f32 * 0.5 - y * PIXELS_PER_UNIT,
        ]
    }
}

fn edge(a: [f32; 2], b: [f32; 2], p: [f32; 2]) -> f32 {
    (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0])
}

/// Calls `emit` for every pixel whose centre lies inside the triangle, with the texture
/// coordinate interpolated at that centre. Winding does not matter; degenerate triangles
/// produce nothing.
pub fn rasterize_triangle(
    viewport: &Viewport,
    triangle: [&Vertex; 3],
    mut emit: impl FnMut(u32, u32, [f32; 3]),
) {
    let [a, b, c] = triangle.map(|v| viewport.to_pixels(v.position));
    let area = edge(a, b, c);
    if area == 0.0 || !area.is_finite() {
        return;
    }

    let min_x = a[0].min(b[0]).min(c[0]).floor().max(0.0) as u32;
    let min_y = a[1].min(b[1]).min(c[1]).floor().max(0.0) as u32;
    let max_x = (a[0].max(b[0]).max(c[0]).ceil() as u32).min(viewport.width);
    let max_y = (a[1].max(b[1]).max(c[1]).ceil() as u32).min(viewport.height);

    for y in min_y..max_y {
        for x in min_x..max_x {
            let p = [x as f32 + 0.5, y as f32 + 0.5];
            let w0 = edge(b, c, p) / area;
            let w1 = edge(c, a, p) / area;
            let w2 = edge(a, b, p) / area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }

            let mut texcoord = [0.0; 3];
            for (i, t) in texcoord.iter_mut().enumerate() {
                *t = w0 * triangle[0].texcoord[i]
                    + w1 * triangle[1].texcoord[i]
                    + w2 * triangle[2].texcoord[i];
            }
            emit(x, y, texcoord);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(position: [f32; 2], texcoord: [f32; 3]) -> Vertex {
        Vertex { position, texcoord }
    }

    #[test]
    fn viewport_centres_the_canvas() {
        let viewport = Viewport::new(640, 480);
        assert_eq!(viewport.to_pixels([0.0, 0.0]), [320.0, 240.0]);
        assert_eq!(viewport.to_pixels([-2.75, 1.75]), [45.0, 65.0]);
        assert_eq!(viewport.to_pixels([2.75, -1.75]), [595.0, 415.0]);
    }

    #[test]
    fn covers_pixels_regardless_of_winding() {
        let viewport = Viewport::new(400, 400);
        let a = vertex([-1.0, 1.0], [0.0, 0.0, 0.5]);
        let b = vertex([0.0, 1.0], [1.0, 0.0, 0.5]);
        let c = vertex([-1.0, 0.0], [0.0, 1.0, 0.5]);

        let mut cw = Vec::new();
        rasterize_triangle(&viewport, [&a, &b, &c], |x, y, _| cw.push((x, y)));
        let mut ccw = Vec::new();
        rasterize_triangle(&viewport, [&a, &c, &b], |x, y, _| ccw.push((x, y)));

        assert!(!cw.is_empty());
        assert_eq!(cw, ccw);
        assert!(cw
            .iter()
            .all(|&(x, y)| (100..200).contains(&x) && (100..200).contains(&y)));
    }

    #[test]
    fn interpolates_texcoords() {
        let viewport = Viewport::new(800, 800);
        let a = vertex([-1.0, 1.0], [0.0, 0.0, 0.25]);
        let b = vertex([1.0, 1.0], [8.0, 0.0, 0.25]);
        let c = vertex([1.0, -1.0], [8.0, 8.0, 0.25]);

        let mut seen = Vec::new();
        rasterize_triangle(&viewport, [&a, &b, &c], |x, y, t| seen.push((x, y, t)));
        let &(_, _, t) = seen.iter().find(|&&(x, y, _)| (x, y) == (499, 300)).unwrap();
        assert!((t[0] - 7.98).abs() < 1e-3);
        assert!((t[1] - 0.02).abs() < 1e-3);
        assert!((t[2] - 0.25).abs() < 1e-5);
    }

    #[test]
    fn degenerate_triangle_emits_nothing() {
        let viewport = Viewport::new(8, 8);
        let a = vertex([0.0, 0.0], [0.0; 3]);
        let mut count = 0;
        rasterize_triangle(&viewport, [&a, &a, &a], |_, _, _| count += 1);
        assert_eq!(count, 0);
    }
}
