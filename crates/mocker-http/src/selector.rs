//! Response selection for MOCKED routes.

use crate::config::ResponseStrategy;
use crate::error::MockerError;
use crate::response::{read_response, RouteResponse};
use crate::route::Route;
use rand::Rng;
use std::path::Path;
use tracing::debug;

/// Pick the file a MOCKED route answers with, advancing the SEQUENCE cursor.
///
/// Returns `None` for unrecognised strategies. Index selection happens here,
/// before any await point, so the thread-local RNG never crosses one.
pub fn pick_file(route: &Route) -> Option<&Path> {
    match route.strategy {
        ResponseStrategy::Concrete => Some(route.response_path.as_path()),
        ResponseStrategy::Random => {
            if route.files.is_empty() {
                return None;
            }
            let index = rand::thread_rng().gen_range(0..route.files.len());
            route.files.get(index).map(|p| p.as_path())
        }
        ResponseStrategy::Sequence => {
            let index = route.cursor.advance(route.files.len())?;
            route.files.get(index).map(|p| p.as_path())
        }
        ResponseStrategy::Unknown => None,
    }
}

/// Resolve a MOCKED route to its response.
///
/// Unrecognised strategies answer "UNKNOWN" without touching the filesystem.
/// Reader errors propagate unchanged.
pub async fn select_response(route: &Route) -> Result<RouteResponse, MockerError> {
    let Some(path) = pick_file(route) else {
        debug!(
            "Route {} has unrecognised strategy {:?}, answering UNKNOWN",
            route.key, route.strategy
        );
        return Ok(RouteResponse::unknown());
    };
    debug!("Route {} serving {}", route.key, path.display());
    read_response(path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouteDefinition;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn route_with_files(strategy: &str, count: usize) -> (TempDir, Route) {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..count {
            std::fs::write(dir.path().join(format!("f{i}.xml")), format!("<f{i}/>")).unwrap();
        }
        let mut definition: RouteDefinition = serde_yaml::from_str(&format!(
            "path: /r\nmethod: GET\nstatus: MOCKED\nstrategy: {strategy}"
        ))
        .unwrap();
        definition.response_path = Some(dir.path().to_path_buf());
        let route = Route::from_definition(&definition).unwrap().unwrap();
        (dir, route)
    }

    #[tokio::test]
    async fn test_sequence_cycles_in_order() {
        let (_dir, route) = route_with_files("SEQUENCE", 3);
        let mut bodies = Vec::new();
        for _ in 0..7 {
            bodies.push(select_response(&route).await.unwrap().body);
        }
        assert_eq!(
            bodies,
            vec!["<f0/>", "<f1/>", "<f2/>", "<f0/>", "<f1/>", "<f2/>", "<f0/>"]
        );
    }

    #[tokio::test]
    async fn test_random_covers_every_file() {
        let (_dir, route) = route_with_files("RANDOM", 4);
        let mut seen = HashSet::new();
        for _ in 0..400 {
            seen.insert(select_response(&route).await.unwrap().body);
        }
        assert_eq!(seen.len(), 4);
        // RANDOM never moves the cursor
        assert_eq!(route.cursor.peek(), -1);
    }

    #[tokio::test]
    async fn test_concrete_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("fixed.xml");
        std::fs::write(&file, "<fixed/>").unwrap();
        let mut definition: RouteDefinition =
            serde_yaml::from_str("path: /c\nmethod: GET\nstatus: MOCKED\nstrategy: CONCRETE")
                .unwrap();
        definition.response_path = Some(file);
        let route = Route::from_definition(&definition).unwrap().unwrap();

        for _ in 0..5 {
            assert_eq!(select_response(&route).await.unwrap().body, "<fixed/>");
        }
    }

    #[tokio::test]
    async fn test_unknown_strategy_answers_unknown() {
        let definition: RouteDefinition =
            serde_yaml::from_str("path: /u\nmethod: GET\nstatus: MOCKED\nstrategy: SHUFFLE")
                .unwrap();
        let route = Route::from_definition(&definition).unwrap().unwrap();
        let response = select_response(&route).await.unwrap();
        assert!(response.is_unknown());
    }

    #[tokio::test]
    async fn test_missing_strategy_answers_unknown() {
        let definition: RouteDefinition =
            serde_yaml::from_str("path: /u\nmethod: GET\nstatus: MOCKED").unwrap();
        let route = Route::from_definition(&definition).unwrap().unwrap();
        assert!(select_response(&route).await.unwrap().is_unknown());
    }

    #[tokio::test]
    async fn test_file_removed_after_load_is_not_found() {
        let (dir, route) = route_with_files("SEQUENCE", 2);
        std::fs::remove_file(dir.path().join("f0.xml")).unwrap();
        let err = select_response(&route).await.unwrap_err();
        assert!(matches!(err, MockerError::NotFound(_)));
        // The failed request still consumed its cursor slot
        assert_eq!(select_response(&route).await.unwrap().body, "<f1/>");
    }
}
