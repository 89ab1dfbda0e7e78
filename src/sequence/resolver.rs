use crate::error::ScrubError;
use crate::loader::{FrameLoader, Preloader};
use crate::options::CatalogOptions;
use crate::sequence::FrameId;

/// Find the first base path candidate that serves frame 0.
///
/// Candidates are probed one at a time, in order, stopping at the first
/// success. The probe goes through the preloader, so a successful probe
/// leaves frame 0 cached under the same identifier the catalog will use.
pub async fn resolve_base_path<L: FrameLoader>(
    preloader: &Preloader<L>,
    catalog: &CatalogOptions,
) -> Result<String, ScrubError> {
    let probe_file = catalog.template.file_name(0);

    for base in &catalog.base_paths {
        let probe = FrameId::new(format!("{base}{probe_file}"));
        match preloader.preload_one(&probe).await {
            Ok(_) => {
                log::info!("frame path resolved: {base}");
                return Ok(base.clone());
            }
            Err(_) => log::warn!("frame path did not work: {base}"),
        }
    }

    Err(ScrubError::PathResolution {
        candidates: catalog.base_paths.clone(),
    })
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::loader::testing::MockLoader;

    fn options(paths: &[&str]) -> CatalogOptions {
        CatalogOptions {
            base_paths: paths.iter().map(|p| (*p).to_owned()).collect(),
            ..CatalogOptions::default()
        }
    }

    #[test]
    fn first_working_candidate_wins_and_stops_probing() {
        let preloader = Preloader::new(MockLoader::serving("frames/"), 5);
        let opts = options(&["./frames/", "/frames/", "frames/", "../frames/"]);

        let base = block_on(resolve_base_path(&preloader, &opts)).unwrap();
        assert_eq!(base, "frames/");

        let probe = opts.template.file_name(0);
        assert_eq!(
            preloader.loader().calls(),
            vec![
                format!("./frames/{probe}"),
                format!("/frames/{probe}"),
                format!("frames/{probe}"),
            ]
        );
        assert!(preloader.cached(&FrameId::new(format!("frames/{probe}"))).is_some());
    }

    #[test]
    fn no_working_candidate_is_fatal() {
        let preloader = Preloader::new(MockLoader::serving("https://cdn/"), 5);
        let opts = options(&["./frames/", "/frames/"]);

        let err = block_on(resolve_base_path(&preloader, &opts)).unwrap_err();
        match err {
            ScrubError::PathResolution { candidates } => {
                assert_eq!(candidates, vec!["./frames/", "/frames/"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(preloader.cached_len(), 0);
    }
}
