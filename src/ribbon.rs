use glam::Vec3;
use serde::Serialize;

/// Triangulated strip following a polyline on the ground plane.
///
/// Meshes are values: every change to a trail builds a fresh one and swaps it
/// in, so a renderer never sees a half-updated strip.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RibbonMesh {
    positions: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

impl RibbonMesh {
    pub fn empty() -> RibbonMesh {
        RibbonMesh::default()
    }

    /// One quad per consecutive point pair, `width` wide, perpendicular to
    /// the segment in the xz plane. Fewer than two points give an empty mesh.
    pub fn build<I>(points: I, width: f32) -> RibbonMesh
    where
        I: IntoIterator<Item = Vec3>,
        I::IntoIter: Clone,
    {
        let points = points.into_iter();
        let half_width = width / 2.0;
        let mut mesh = RibbonMesh::empty();

        for (i, (p1, p2)) in points.clone().zip(points.skip(1)).enumerate() {
            let dir = (p2 - p1).normalize_or_zero();
            let perp = Vec3::new(-dir.z, 0.0, dir.x) * half_width;

            mesh.positions.extend_from_slice(&[
                (p1 + perp).to_array(),
                (p1 - perp).to_array(),
                (p2 + perp).to_array(),
                (p2 - perp).to_array(),
            ]);

            let base = (i * 4) as u32;
            mesh.indices.extend_from_slice(&[
                base,
                base + 1,
                base + 2,
                base + 1,
                base + 3,
                base + 2,
            ]);
        }

        mesh
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn segment_count(&self) -> usize {
        self.positions.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Unindexed copy, three vertices per triangle.
    pub fn triangle_list(&self) -> Vec<[f32; 3]> {
        self.indices
            .iter()
            .map(|&i| self.positions[i as usize])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_polylines_have_no_geometry() {
        assert!(RibbonMesh::build(Vec::<Vec3>::new(), 0.2).is_empty());
        let single = RibbonMesh::build(vec![Vec3::new(1.0, 0.05, 2.0)], 0.2);
        assert!(single.is_empty());
        assert!(single.positions().is_empty());
        assert!(single.triangle_list().is_empty());
    }

    #[test]
    fn segment_along_z_spreads_along_x() {
        let mesh = RibbonMesh::build(
            vec![Vec3::new(0.0, 0.05, 0.0), Vec3::new(0.0, 0.05, 1.0)],
            0.2,
        );
        assert_eq!(mesh.segment_count(), 1);
        assert_eq!(
            mesh.positions(),
            &[
                [-0.1, 0.05, 0.0],
                [0.1, 0.05, 0.0],
                [-0.1, 0.05, 1.0],
                [0.1, 0.05, 1.0],
            ]
        );
        assert_eq!(mesh.indices(), &[0, 1, 2, 1, 3, 2]);
    }

    #[test]
    fn quads_are_indexed_per_segment() {
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 1.0),
        ];
        let mesh = RibbonMesh::build(points.iter().copied(), 0.5);
        assert_eq!(mesh.segment_count(), 2);
        assert_eq!(mesh.positions().len(), 8);
        assert_eq!(&mesh.indices()[6..], &[4, 5, 6, 5, 7, 6]);

        // Second segment runs along +z, so its width lies along x.
        let [x, _, z] = mesh.positions()[4];
        assert!((x - 0.75).abs() < 1e-6 || (x - 1.25).abs() < 1e-6);
        assert_eq!(z, 0.0);

        for p in mesh.positions() {
            assert_eq!(p[1], 0.0);
        }
    }

    #[test]
    fn triangle_list_expands_indices() {
        let mesh = RibbonMesh::build(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(0.0, 0.0, 2.0),
            ],
            0.2,
        );
        let tris = mesh.triangle_list();
        assert_eq!(tris.len(), 12);
        assert_eq!(tris[3], mesh.positions()[1]);
        assert_eq!(tris[11], mesh.positions()[6]);
    }
}
