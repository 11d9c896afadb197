//! The demo pipeline: shells, antimeridian handling, pole search, rendering.

use std::error::Error;
use std::path::PathBuf;

use ugrid_config::Config;
use ugrid_connectivity::EdgeConnectivity;
use ugrid_geometry::{
    BuildOptions, MeshView, Pole, antimeridian_face_indices, build_corrected_shells,
};
use ugrid_render::{BackendKind, RenderInput, backend_for};

use crate::grid::LatLonGrid;

/// What one pipeline run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub nodes: usize,
    pub faces: usize,
    pub edges: usize,
    pub antimeridian_faces: Vec<usize>,
    pub corrected_shells: usize,
    pub north_pole_faces: Vec<usize>,
    pub south_pole_faces: Vec<usize>,
    pub backend: BackendKind,
    pub rendered_items: usize,
    pub written_to: Option<PathBuf>,
}

impl Summary {
    pub fn log(&self) {
        tracing::info!(
            nodes = self.nodes,
            faces = self.faces,
            edges = self.edges,
            "mesh topology"
        );
        tracing::info!(
            flagged = self.antimeridian_faces.len(),
            corrected_shells = self.corrected_shells,
            "antimeridian correction"
        );
        tracing::info!(
            north = self.north_pole_faces.len(),
            south = self.south_pole_faces.len(),
            "faces containing a pole"
        );
        match &self.written_to {
            Some(path) => tracing::info!(
                backend = %self.backend,
                items = self.rendered_items,
                "wrote {}",
                path.display()
            ),
            None => tracing::info!(backend = %self.backend, items = self.rendered_items, "rendered"),
        }
    }
}

pub fn build_options(config: &Config) -> BuildOptions {
    BuildOptions::default()
        .with_parallel(config.geometry.parallel)
        .with_parallel_threshold(config.geometry.parallel_threshold)
}

/// Run every stage on the configured synthetic grid.
pub fn run(config: &Config) -> Result<Summary, Box<dyn Error + Send + Sync>> {
    let backend_kind: BackendKind = config.render.backend.parse()?;
    let options = build_options(config);

    let grid = LatLonGrid::generate(
        config.demo.lon_cells as usize,
        config.demo.lat_cells as usize,
        config.demo.lon_offset_deg,
    );
    let mesh = MeshView::from_arrays(&grid.lon, &grid.lat, &grid.faces)?.with_options(options);
    tracing::debug!(
        lon_cells = grid.lon_cells,
        lat_cells = grid.lat_cells,
        "generated lat-lon grid"
    );

    let edges = EdgeConnectivity::build(mesh.faces())?;
    let shells = mesh.polygon_shells()?;
    let antimeridian_faces = antimeridian_face_indices(&shells, &options);
    let corrected = build_corrected_shells(&shells, &options);
    let north_pole_faces = mesh.faces_containing_pole(Pole::North)?;
    let south_pole_faces = mesh.faces_containing_pole(Pole::South)?;

    let input = RenderInput::new(&shells)
        .with_antimeridian_correction(config.geometry.correct_antimeridian_polygons)
        .with_options(options);
    let output = backend_for(backend_kind).render(&input)?;

    let written_to = match &config.render.output_path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, output.to_json_pretty()?)?;
            Some(path.clone())
        }
        None => None,
    };

    Ok(Summary {
        nodes: grid.num_nodes(),
        faces: grid.num_faces(),
        edges: edges.num_edges(),
        antimeridian_faces,
        corrected_shells: corrected.len(),
        north_pole_faces,
        south_pole_faces,
        backend: backend_kind,
        rendered_items: output.item_count(),
        written_to,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_run() {
        let summary = run(&Config::default()).unwrap();
        assert_eq!(summary.faces, 36 * 18);
        assert_eq!(summary.antimeridian_faces.len(), 18);
        assert_eq!(summary.corrected_shells, 36 * 18 + 18);
        assert_eq!(summary.rendered_items, summary.corrected_shells);
        assert_eq!(summary.backend, BackendKind::PolyCollection);
        assert!(summary.written_to.is_none());
        // Only the polar rows hold a pole, equator cells under lon 0 included.
        assert_eq!(summary.north_pole_faces, (17 * 36..18 * 36).collect::<Vec<_>>());
        assert_eq!(summary.south_pole_faces, (0..36).collect::<Vec<_>>());
    }

    #[test]
    fn test_seam_aligned_grid_is_not_split() {
        let mut config = Config::default();
        config.demo.lon_offset_deg = 0.0;
        let summary = run(&config).unwrap();
        // The last column runs from 170 to -180: flagged, but only touching
        // the seam, so it is rewritten rather than split.
        assert_eq!(summary.antimeridian_faces.len(), 18);
        assert_eq!(summary.corrected_shells, summary.faces);
        // Cells meeting at (0, 0) are judged against the antipodal reference.
        assert_eq!(summary.north_pole_faces.len(), 36);
        assert_eq!(summary.south_pole_faces.len(), 36);
    }

    #[test]
    fn test_geojson_written_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("mesh.geojson");
        let mut config = Config::default();
        config.render.backend = "geo_json".to_string();
        config.render.output_path = Some(path.clone());
        config.demo.lon_cells = 12;
        config.demo.lat_cells = 6;

        let summary = run(&config).unwrap();
        assert_eq!(summary.written_to.as_deref(), Some(path.as_path()));
        assert_eq!(summary.rendered_items, 72);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("MultiPolygon"));
    }

    #[test]
    fn test_uncorrected_poly_collection_is_rejected() {
        let mut config = Config::default();
        config.geometry.correct_antimeridian_polygons = false;
        assert!(run(&config).is_err());
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let mut config = Config::default();
        config.render.backend = "svg".to_string();
        let err = run(&config).unwrap_err();
        assert!(err.to_string().contains("svg"), "unexpected error: {err}");
    }
}
