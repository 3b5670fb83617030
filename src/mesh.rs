//! Triangle meshes.
//!
//! A [`Mesh`] is a flattened triangle list: every three consecutive
//! [`Vertex`] entries form one face. This is the layout the pipeline consumes
//! directly, one face per draw call.

use std::path::Path;

use log::info;

use crate::error::LoadError;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

/// One triangle corner as read from the model file.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub texcoord: Vec2,
    pub normal: Vec3,
}

impl Vertex {
    pub const fn new(position: Vec3, texcoord: Vec2, normal: Vec3) -> Self {
        Self {
            position,
            texcoord,
            normal,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    vertices: Vec<Vertex>,
}

impl Mesh {
    /// Wraps an already flattened triangle list.
    ///
    /// A trailing partial face (fewer than three vertices) is dropped.
    pub fn new(mut vertices: Vec<Vertex>) -> Self {
        let whole = vertices.len() - vertices.len() % 3;
        vertices.truncate(whole);
        Self { vertices }
    }

    /// Loads every object in an OBJ file into a single flattened mesh.
    ///
    /// Faces are triangulated and re-indexed so that position, texture
    /// coordinate and normal share one index. Missing texture coordinates
    /// default to `(0, 0)`, missing normals to `(0, 0, 0)`.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )?;

        let mut vertices = Vec::new();
        for model in &models {
            let mesh = &model.mesh;
            for &index in &mesh.indices {
                let i = index as usize;
                let position = Vec3::new(
                    mesh.positions[3 * i],
                    mesh.positions[3 * i + 1],
                    mesh.positions[3 * i + 2],
                );
                let texcoord = if mesh.texcoords.len() >= 2 * i + 2 {
                    Vec2::new(mesh.texcoords[2 * i], mesh.texcoords[2 * i + 1])
                } else {
                    Vec2::ZERO
                };
                let normal = if mesh.normals.len() >= 3 * i + 3 {
                    Vec3::new(
                        mesh.normals[3 * i],
                        mesh.normals[3 * i + 1],
                        mesh.normals[3 * i + 2],
                    )
                } else {
                    Vec3::ZERO
                };
                vertices.push(Vertex::new(position, texcoord, normal));
            }
        }

        let mesh = Self::new(vertices);
        if mesh.num_faces() == 0 {
            return Err(LoadError::EmptyMesh);
        }
        info!(
            "loaded {} ({} objects, {} faces)",
            path.display(),
            models.len(),
            mesh.num_faces()
        );
        Ok(mesh)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn num_faces(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Returns the three corners of face `index`.
    pub fn face(&self, index: usize) -> Option<&[Vertex; 3]> {
        self.vertices.get(3 * index..3 * index + 3)?.try_into().ok()
    }

    /// Iterates faces in file order.
    pub fn faces(&self) -> impl Iterator<Item = &[Vertex; 3]> + '_ {
        self.vertices
            .chunks_exact(3)
            .filter_map(|chunk| chunk.try_into().ok())
    }
}
