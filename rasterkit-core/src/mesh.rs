/// Procedural mesh generation for cubes and UV spheres
use std::f64::consts::PI;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("invalid parameter: {name} must be at least {min}, got {value}")]
    InvalidParameter {
        name: &'static str,
        value: u32,
        min: u32,
    },
    #[error("attribute length mismatch: {positions} positions, {normals} normals, {uvs} uvs")]
    LengthMismatch {
        positions: usize,
        normals: usize,
        uvs: usize,
    },
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
    #[error("{0} elements do not form whole triangles")]
    PartialTriangle(usize),
}

/// Requested procedural shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshShape {
    Cube,
    Sphere { stacks: u32, sectors: u32 },
}

/// Parallel per-vertex attribute buffers.
///
/// Without `indices` every three consecutive vertices form a triangle;
/// with them every three consecutive indices do.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    pub positions: Vec<[f64; 3]>,
    pub normals: Vec<[f64; 3]>,
    pub uv_coords: Vec<[f64; 2]>,
    pub indices: Option<Vec<u32>>,
}

impl MeshBuffers {
    pub fn generate(shape: MeshShape) -> Result<Self, MeshError> {
        match shape {
            MeshShape::Cube => Ok(create_cube()),
            MeshShape::Sphere { stacks, sectors } => create_sphere(stacks, sectors),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.positions.len() / 3,
        }
    }

    /// Vertex index triples of every triangle, for soup and indexed meshes
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        (0..self.triangle_count()).map(move |t| match &self.indices {
            Some(indices) => [
                indices[3 * t] as usize,
                indices[3 * t + 1] as usize,
                indices[3 * t + 2] as usize,
            ],
            None => [3 * t, 3 * t + 1, 3 * t + 2],
        })
    }

    /// Check that attributes are parallel and indices are in range
    pub fn validate(&self) -> Result<(), MeshError> {
        let count = self.positions.len();
        if self.normals.len() != count || self.uv_coords.len() != count {
            return Err(MeshError::LengthMismatch {
                positions: count,
                normals: self.normals.len(),
                uvs: self.uv_coords.len(),
            });
        }
        match &self.indices {
            Some(indices) => {
                if indices.len() % 3 != 0 {
                    return Err(MeshError::PartialTriangle(indices.len()));
                }
                if let Some(&index) = indices.iter().find(|&&i| i as usize >= count) {
                    return Err(MeshError::IndexOutOfRange {
                        index,
                        vertex_count: count,
                    });
                }
            }
            None if count % 3 != 0 => return Err(MeshError::PartialTriangle(count)),
            None => {}
        }
        Ok(())
    }

    fn push_vertex(&mut self, position: [f64; 3], normal: [f64; 3], uv: [f64; 2]) {
        self.positions.push(position);
        self.normals.push(normal);
        self.uv_coords.push(uv);
    }

    /// Append one quad as two triangles (0-1-2, 0-2-3).
    ///
    /// Corners are counter-clockwise seen from outside, starting at the
    /// corner mapped to `(umin, vmin)`.
    fn push_face(&mut self, corners: [[f64; 3]; 4], normal: [f64; 3], cell: UvCell) {
        let uvs = [
            [cell.umin, cell.vmin],
            [cell.umax, cell.vmin],
            [cell.umax, cell.vmax],
            [cell.umin, cell.vmax],
        ];
        for idx in [0, 1, 2, 0, 2, 3] {
            self.push_vertex(corners[idx], normal, uvs[idx]);
        }
    }
}

/// Rectangle of the cube texture atlas assigned to one face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvCell {
    pub umin: f64,
    pub vmin: f64,
    pub umax: f64,
    pub vmax: f64,
}

impl UvCell {
    const fn new(umin: f64, vmin: f64, umax: f64, vmax: f64) -> Self {
        Self {
            umin,
            vmin,
            umax,
            vmax,
        }
    }
}

const THIRD: f64 = 1.0 / 3.0;
const TWO_THIRDS: f64 = 2.0 / 3.0;

/// Die atlas of two columns by three rows, v growing upward:
///
/// ```text
/// v 1   front  | bottom
///   2/3 right  | left
///   1/3 top    | back
///   0   u 0 .. 0.5 .. 1
/// ```
pub const CUBE_UV_FRONT: UvCell = UvCell::new(0.0, TWO_THIRDS, 0.5, 1.0);
pub const CUBE_UV_BACK: UvCell = UvCell::new(0.5, 0.0, 1.0, THIRD);
pub const CUBE_UV_RIGHT: UvCell = UvCell::new(0.0, THIRD, 0.5, TWO_THIRDS);
pub const CUBE_UV_LEFT: UvCell = UvCell::new(0.5, THIRD, 1.0, TWO_THIRDS);
pub const CUBE_UV_TOP: UvCell = UvCell::new(0.0, 0.0, 0.5, THIRD);
pub const CUBE_UV_BOTTOM: UvCell = UvCell::new(0.5, TWO_THIRDS, 1.0, 1.0);

/// Cube spanning [-1, 1] on every axis as a 36-vertex triangle soup
pub fn create_cube() -> MeshBuffers {
    let mut mesh = MeshBuffers::default();

    // Front face: z = +1
    mesh.push_face(
        [[-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]],
        [0.0, 0.0, 1.0],
        CUBE_UV_FRONT,
    );

    // Right face: x = +1
    mesh.push_face(
        [[1.0, -1.0, 1.0], [1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0]],
        [1.0, 0.0, 0.0],
        CUBE_UV_RIGHT,
    );

    // Left face: x = -1
    mesh.push_face(
        [[-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0]],
        [-1.0, 0.0, 0.0],
        CUBE_UV_LEFT,
    );

    // Back face: z = -1
    mesh.push_face(
        [[1.0, -1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [1.0, 1.0, -1.0]],
        [0.0, 0.0, -1.0],
        CUBE_UV_BACK,
    );

    // Top face: y = +1
    mesh.push_face(
        [[-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0], [-1.0, 1.0, -1.0]],
        [0.0, 1.0, 0.0],
        CUBE_UV_TOP,
    );

    // Bottom face: y = -1
    mesh.push_face(
        [[-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [-1.0, -1.0, 1.0]],
        [0.0, -1.0, 0.0],
        CUBE_UV_BOTTOM,
    );

    log::debug!("generated cube with {} vertices", mesh.vertex_count());
    mesh
}

/// Unit UV sphere centered at the origin.
///
/// Builds a `(stacks + 1) x (sectors + 1)` vertex grid from the `+z` pole
/// down to `-z`, with `theta` the polar angle from `+z` and `phi` the
/// azimuth in the xy plane. The seam column and the pole rows are
/// duplicated so every vertex carries its own UV. `u` follows `phi` and `v`
/// falls from 1 at `+z` to 0 at `-z`, so textures read unmirrored from
/// outside. Triangles are counter-clockwise seen from outside.
pub fn create_sphere(stacks: u32, sectors: u32) -> Result<MeshBuffers, MeshError> {
    if stacks < 1 {
        return Err(MeshError::InvalidParameter {
            name: "stacks",
            value: stacks,
            min: 1,
        });
    }
    if sectors < 3 {
        return Err(MeshError::InvalidParameter {
            name: "sectors",
            value: sectors,
            min: 3,
        });
    }

    let columns = sectors + 1;
    let vertex_count = ((stacks + 1) * columns) as usize;
    let mut mesh = MeshBuffers {
        positions: Vec::with_capacity(vertex_count),
        normals: Vec::with_capacity(vertex_count),
        uv_coords: Vec::with_capacity(vertex_count),
        indices: None,
    };

    for i in 0..=stacks {
        let theta = f64::from(i) * PI / f64::from(stacks);
        let v = 1.0 - f64::from(i) / f64::from(stacks);
        for j in 0..=sectors {
            let phi = f64::from(j) * 2.0 * PI / f64::from(sectors);
            let u = f64::from(j) / f64::from(sectors);
            let p = [theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos()];
            mesh.push_vertex(p, p, [u, v]);
        }
    }

    let mut indices = Vec::with_capacity((6 * stacks * sectors) as usize);
    for i in 0..stacks {
        for j in 0..sectors {
            let first = i * columns + j;
            let second = first + columns;
            indices.extend_from_slice(&[first, second, first + 1]);
            indices.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }
    mesh.indices = Some(indices);

    log::debug!(
        "generated sphere ({} stacks, {} sectors) with {} vertices",
        stacks,
        sectors,
        mesh.vertex_count()
    );
    Ok(mesh)
}
