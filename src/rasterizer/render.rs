//! Core rendering functions
//! Triangle rasterization with PS1-style effects

use super::math::{barycentric, perspective_transform, project, Vec3};
use super::types::{Color, Face, RasterSettings, ShadingMode, Vertex};

/// Framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>,    // RGBA, 4 bytes per pixel
    pub zbuffer: Vec<f32>,  // Depth buffer
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            zbuffer: vec![f32::MAX; width * height],
            width,
            height,
        }
    }

    /// Reallocate for a new size (contents are discarded)
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
        self.zbuffer.fill(f32::MAX);
    }

    #[cfg(test)]
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some(Color {
            r: self.pixels[idx],
            g: self.pixels[idx + 1],
            b: self.pixels[idx + 2],
            a: self.pixels[idx + 3],
        })
    }

    pub fn set_pixel_with_depth(&mut self, x: usize, y: usize, z: f32, color: Color) -> bool {
        if x < self.width && y < self.height {
            let idx = y * self.width + x;
            if z < self.zbuffer[idx] {
                self.zbuffer[idx] = z;
                let pixel_idx = idx * 4;
                self.pixels[pixel_idx..pixel_idx + 4].copy_from_slice(&color.to_bytes());
                return true;
            }
        }
        false
    }
}

/// Camera state
pub struct Camera {
    pub position: Vec3,
    pub rotation_x: f32, // Pitch
    pub rotation_y: f32, // Yaw

    // Computed basis vectors
    pub basis_x: Vec3,
    pub basis_y: Vec3,
    pub basis_z: Vec3,
}

impl Camera {
    pub fn new() -> Self {
        let mut cam = Self {
            position: Vec3::ZERO,
            rotation_x: 0.0,
            rotation_y: 0.0,
            basis_x: Vec3::new(1.0, 0.0, 0.0),
            basis_y: Vec3::UP,
            basis_z: Vec3::new(0.0, 0.0, 1.0),
        };
        cam.update_basis();
        cam
    }

    pub fn update_basis(&mut self) {
        let upward = Vec3::new(0.0, -1.0, 0.0);  // Use -Y as up to match screen coordinates

        // Forward vector based on rotation
        self.basis_z = Vec3 {
            x: self.rotation_x.cos() * self.rotation_y.sin(),
            y: -self.rotation_x.sin(),
            z: self.rotation_x.cos() * self.rotation_y.cos(),
        };

        // Right vector
        self.basis_x = upward.cross(self.basis_z).normalize();

        // Up vector
        self.basis_y = self.basis_z.cross(self.basis_x);
    }

    /// Place the camera at `eye` and aim the forward axis at `target`
    pub fn look_at(&mut self, eye: Vec3, target: Vec3) {
        self.position = eye;

        let dir = (target - eye).normalize();
        if dir == Vec3::ZERO {
            return;
        }

        let limit = std::f32::consts::FRAC_PI_2 - 0.01;
        self.rotation_x = (-dir.y).clamp(-1.0, 1.0).asin().clamp(-limit, limit);
        self.rotation_y = dir.x.atan2(dir.z);
        self.update_basis();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Triangle soup ready for `render_mesh`
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
    }

    /// Append an axis-aligned box centered at `center` with full extents `size`
    pub fn push_box(&mut self, center: Vec3, size: Vec3, color: Color) {
        let h = size * 0.5;
        let corner = |sx: f32, sy: f32, sz: f32| {
            Vec3::new(center.x + sx * h.x, center.y + sy * h.y, center.z + sz * h.z)
        };

        // Four corners per side, wound consistently
        let sides: [([Vec3; 4], Vec3); 6] = [
            // Front (+Z)
            ([corner(-1.0, -1.0, 1.0), corner(1.0, -1.0, 1.0), corner(1.0, 1.0, 1.0), corner(-1.0, 1.0, 1.0)],
             Vec3::new(0.0, 0.0, 1.0)),
            // Back (-Z)
            ([corner(-1.0, -1.0, -1.0), corner(-1.0, 1.0, -1.0), corner(1.0, 1.0, -1.0), corner(1.0, -1.0, -1.0)],
             Vec3::new(0.0, 0.0, -1.0)),
            // Top (+Y)
            ([corner(-1.0, 1.0, -1.0), corner(-1.0, 1.0, 1.0), corner(1.0, 1.0, 1.0), corner(1.0, 1.0, -1.0)],
             Vec3::new(0.0, 1.0, 0.0)),
            // Bottom (-Y)
            ([corner(-1.0, -1.0, -1.0), corner(1.0, -1.0, -1.0), corner(1.0, -1.0, 1.0), corner(-1.0, -1.0, 1.0)],
             Vec3::new(0.0, -1.0, 0.0)),
            // Right (+X)
            ([corner(1.0, -1.0, -1.0), corner(1.0, 1.0, -1.0), corner(1.0, 1.0, 1.0), corner(1.0, -1.0, 1.0)],
             Vec3::new(1.0, 0.0, 0.0)),
            // Left (-X)
            ([corner(-1.0, -1.0, -1.0), corner(-1.0, -1.0, 1.0), corner(-1.0, 1.0, 1.0), corner(-1.0, 1.0, -1.0)],
             Vec3::new(-1.0, 0.0, 0.0)),
        ];

        for (quad, normal) in sides {
            let base = self.vertices.len();
            for pos in quad {
                self.vertices.push(Vertex::new(pos, normal));
            }
            self.faces.push(Face::new(base, base + 1, base + 2, color));
            self.faces.push(Face::new(base, base + 2, base + 3, color));
        }
    }

    /// Append an octahedron (gem shape) spun by `yaw` radians around +Y
    pub fn push_octahedron(&mut self, center: Vec3, radius: f32, yaw: f32, color: Color) {
        let top = center + Vec3::new(0.0, radius, 0.0);
        let bottom = center + Vec3::new(0.0, -radius, 0.0);
        let ring = [
            Vec3::new(radius, 0.0, 0.0),
            Vec3::new(0.0, 0.0, radius),
            Vec3::new(-radius, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -radius),
        ]
        .map(|offset| center + offset.rotate_y(yaw));

        for i in 0..4 {
            let a = ring[i];
            let b = ring[(i + 1) % 4];
            for apex in [top, bottom] {
                let normal = (a - center + (b - center) + (apex - center)).normalize();
                let base = self.vertices.len();
                self.vertices.push(Vertex::new(apex, normal));
                self.vertices.push(Vertex::new(a, normal));
                self.vertices.push(Vertex::new(b, normal));
                self.faces.push(Face::new(base, base + 1, base + 2, color));
            }
        }
    }
}

/// Projected surface (triangle ready for rasterization)
struct Surface {
    pub v1: Vec3, // Screen-space vertex 1
    pub v2: Vec3, // Screen-space vertex 2
    pub v3: Vec3, // Screen-space vertex 3
    pub vn1: Vec3, // Vertex normal 1 (camera space)
    pub vn2: Vec3, // Vertex normal 2
    pub vn3: Vec3, // Vertex normal 3
    pub normal: Vec3, // Face normal (camera space)
    pub depth: f32, // Mean camera-space depth, used for fog
    pub face_idx: usize,
}

/// Calculate shading intensity for a normal
fn shade_intensity(normal: Vec3, light_dir: Vec3, ambient: f32) -> f32 {
    let diffuse = normal.dot(light_dir).max(0.0);
    (ambient + (1.0 - ambient) * diffuse).clamp(0.0, 1.0)
}

/// Rasterize a single triangle
fn rasterize_triangle(
    fb: &mut Framebuffer,
    surface: &Surface,
    base_color: Color,
    settings: &RasterSettings,
) {
    // Bounding box
    let min_x = surface.v1.x.min(surface.v2.x).min(surface.v3.x).max(0.0) as usize;
    let max_x = (surface.v1.x.max(surface.v2.x).max(surface.v3.x) + 1.0).min(fb.width as f32) as usize;
    let min_y = surface.v1.y.min(surface.v2.y).min(surface.v3.y).max(0.0) as usize;
    let max_y = (surface.v1.y.max(surface.v2.y).max(surface.v3.y) + 1.0).min(fb.height as f32) as usize;

    let flat_shade = if settings.shading == ShadingMode::Flat {
        shade_intensity(surface.normal, settings.light_dir, settings.ambient)
    } else {
        1.0
    };

    // Light per vertex once, interpolate per pixel
    let (s1, s2, s3) = if settings.shading == ShadingMode::Gouraud {
        (
            shade_intensity(surface.vn1, settings.light_dir, settings.ambient),
            shade_intensity(surface.vn2, settings.light_dir, settings.ambient),
            shade_intensity(surface.vn3, settings.light_dir, settings.ambient),
        )
    } else {
        (1.0, 1.0, 1.0)
    };

    let fog_amount = settings.fog.map(|fog| (fog.color, fog.factor(surface.depth)));

    for y in min_y..max_y {
        for x in min_x..max_x {
            let p = Vec3::new(x as f32, y as f32, 0.0);
            let bc = barycentric(p, surface.v1, surface.v2, surface.v3);

            const ERR: f32 = -0.0001;
            if bc.x >= ERR && bc.y >= ERR && bc.z >= ERR {
                let z = bc.x * surface.v1.z + bc.y * surface.v2.z + bc.z * surface.v3.z;

                if settings.use_zbuffer {
                    let idx = y * fb.width + x;
                    if z >= fb.zbuffer[idx] {
                        continue;
                    }
                }

                let shade = match settings.shading {
                    ShadingMode::Flat => flat_shade,
                    ShadingMode::Gouraud => bc.x * s1 + bc.y * s2 + bc.z * s3,
                };

                let mut color = base_color.shade(shade);
                if let Some((fog_color, amount)) = fog_amount {
                    color = color.mix(fog_color, amount);
                }

                fb.set_pixel_with_depth(x, y, z, color);
            }
        }
    }
}

/// Render a mesh to the framebuffer
pub fn render_mesh(
    fb: &mut Framebuffer,
    mesh: &Mesh,
    camera: &Camera,
    settings: &RasterSettings,
) {
    let vertices = &mesh.vertices;
    let faces = &mesh.faces;

    // Transform and project all vertices
    let mut projected: Vec<Vec3> = Vec::with_capacity(vertices.len());
    let mut cam_space_positions: Vec<Vec3> = Vec::with_capacity(vertices.len());
    let mut cam_space_normals: Vec<Vec3> = Vec::with_capacity(vertices.len());

    for v in vertices {
        let rel_pos = v.pos - camera.position;
        let cam_pos = perspective_transform(rel_pos, camera.basis_x, camera.basis_y, camera.basis_z);
        cam_space_positions.push(cam_pos);

        let screen_pos = project(cam_pos, settings.vertex_snap, fb.width, fb.height);
        projected.push(screen_pos);

        let cam_normal = perspective_transform(v.normal, camera.basis_x, camera.basis_y, camera.basis_z);
        cam_space_normals.push(cam_normal.normalize());
    }

    // Light direction is given in world space; move it into camera space too
    let mut settings = settings.clone();
    settings.light_dir = perspective_transform(
        -settings.light_dir,
        camera.basis_x,
        camera.basis_y,
        camera.basis_z,
    )
    .normalize();

    let mut surfaces: Vec<Surface> = Vec::with_capacity(faces.len());

    for (face_idx, face) in faces.iter().enumerate() {
        let cv1 = cam_space_positions[face.v0];
        let cv2 = cam_space_positions[face.v1];
        let cv3 = cam_space_positions[face.v2];

        // Near plane: skip triangles touching or behind the camera
        if cv1.z <= 0.1 || cv2.z <= 0.1 || cv3.z <= 0.1 {
            continue;
        }

        let edge1 = cv2 - cv1;
        let edge2 = cv3 - cv1;
        let normal = edge1.cross(edge2).normalize();

        if settings.backface_cull && normal.z > 0.0 {
            continue;
        }

        surfaces.push(Surface {
            v1: projected[face.v0],
            v2: projected[face.v1],
            v3: projected[face.v2],
            vn1: cam_space_normals[face.v0],
            vn2: cam_space_normals[face.v1],
            vn3: cam_space_normals[face.v2],
            normal,
            depth: (cv1.z + cv2.z + cv3.z) / 3.0,
            face_idx,
        });
    }

    // Painter's algorithm when the z-buffer is off
    if !settings.use_zbuffer {
        surfaces.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    }

    for surface in &surfaces {
        let color = faces[surface.face_idx].color;
        rasterize_triangle(fb, surface, color, &settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_at_points_forward_axis_at_target() {
        let mut cam = Camera::new();
        let eye = Vec3::new(3.0, 6.0, 11.0);
        let target = Vec3::new(3.0, 1.0, 1.0);
        cam.look_at(eye, target);

        let expected = (target - eye).normalize();
        assert!(cam.basis_z.distance(expected) < 0.0001);
        assert_eq!(cam.position, eye);
    }

    #[test]
    fn test_box_covers_screen_center() {
        let mut fb = Framebuffer::new(320, 240);
        let clear = Color::from_hex(0x0a0a0a);
        fb.clear(clear);

        let mut mesh = Mesh::new();
        mesh.push_box(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 1.0), Color::WHITE);
        assert_eq!(mesh.faces.len(), 12);

        let mut cam = Camera::new();
        cam.look_at(Vec3::new(0.0, 6.0, 10.0), Vec3::new(0.0, 1.0, 0.0));
        render_mesh(&mut fb, &mesh, &cam, &RasterSettings::default());

        assert_ne!(fb.get_pixel(160, 120), Some(clear));
        assert_eq!(fb.get_pixel(0, 0), Some(clear));
    }

    #[test]
    fn test_geometry_behind_camera_is_skipped() {
        let mut fb = Framebuffer::new(64, 48);
        fb.clear(Color::BLACK);

        let mut mesh = Mesh::new();
        mesh.push_octahedron(Vec3::new(0.0, 0.0, -5.0), 0.5, 0.3, Color::WHITE);
        assert_eq!(mesh.faces.len(), 8);

        let cam = Camera::new();
        render_mesh(&mut fb, &mesh, &cam, &RasterSettings::default());
        assert!(fb.pixels.chunks_exact(4).all(|px| px == Color::BLACK.to_bytes()));
    }

    #[test]
    fn test_resize_reallocates() {
        let mut fb = Framebuffer::new(320, 240);
        fb.resize(427, 240);
        assert_eq!(fb.width, 427);
        assert_eq!(fb.pixels.len(), 427 * 240 * 4);
        assert_eq!(fb.zbuffer.len(), 427 * 240);
    }
}
