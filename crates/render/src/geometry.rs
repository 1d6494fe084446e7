/// Flat vertex data for the cube: positions and per-vertex colors, three
/// floats per vertex, drawn as a non-indexed triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
}

/// Face corners, counter-clockwise as seen from outside the cube.
#[rustfmt::skip]
const FACES: [[[f32; 3]; 4]; 6] = [
    // +Z face
    [[-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0], [ 1.0,  1.0,  1.0], [-1.0,  1.0,  1.0]],
    // -Z face
    [[ 1.0, -1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0,  1.0, -1.0], [ 1.0,  1.0, -1.0]],
    // +X face
    [[ 1.0, -1.0,  1.0], [ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0], [ 1.0,  1.0,  1.0]],
    // -X face
    [[-1.0, -1.0, -1.0], [-1.0, -1.0,  1.0], [-1.0,  1.0,  1.0], [-1.0,  1.0, -1.0]],
    // +Y face
    [[-1.0,  1.0,  1.0], [ 1.0,  1.0,  1.0], [ 1.0,  1.0, -1.0], [-1.0,  1.0, -1.0]],
    // -Y face
    [[-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0], [ 1.0, -1.0,  1.0], [-1.0, -1.0,  1.0]],
];

/// Two triangles per face.
const FACE_TRIANGLES: [usize; 6] = [0, 1, 2, 2, 3, 0];

impl Cube {
    /// Cube of side 2 centered at the origin, colored by position.
    pub fn unit() -> Self {
        let mut positions = Vec::with_capacity(FACES.len() * FACE_TRIANGLES.len() * 3);
        let mut colors = Vec::with_capacity(positions.capacity());
        for face in &FACES {
            for &corner in &FACE_TRIANGLES {
                let p = face[corner];
                positions.extend_from_slice(&p);
                colors.extend(p.iter().map(|c| (c + 1.0) * 0.5));
            }
        }
        Self { positions, colors }
    }

    pub fn vertex_count(&self) -> u32 {
        (self.positions.len() / 3) as u32
    }
}
