use booth_types::Slide;
use shared::labels::slide_label;
use std::path::Path;

use crate::{AssetMap, file_name, human_sort, is_supported_image};

/// Ordered, display-ready slides. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideList {
    slides: Vec<Slide>,
    generation: u64,
}

impl SlideList {
    /// Builds the slide list for `assets`, tagging it with `generation` as its identity.
    pub fn build(assets: &AssetMap, generation: u64) -> Self {
        let mut slides = build_slides(assets);
        if slides.is_empty() {
            slides.push(Slide::placeholder());
        }

        Self { slides, generation }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn get(&self, idx: usize) -> Option<&Slide> {
        self.slides.get(idx)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True when the list holds only the synthetic placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.slides.iter().all(Slide::is_placeholder)
    }
}

impl Default for SlideList {
    fn default() -> Self {
        Self::build(&AssetMap::new(), 0)
    }
}

/// Valid image slides for `assets`, sorted by file name. Empty when nothing qualifies.
pub fn build_slides(assets: &AssetMap) -> Vec<Slide> {
    let mut entries: Vec<(&str, &str)> = assets
        .iter()
        .filter_map(|(path, src)| {
            let src = src.trim();
            if src.is_empty() || !is_supported_image(Path::new(path)) {
                return None;
            }
            file_name(path).map(|name| (name, src))
        })
        .collect();

    entries.sort_by(|(a, _), (b, _)| human_sort(a, b).then_with(|| a.cmp(b)));
    entries.dedup_by(|(a, _), (b, _)| {
        let duplicate = a == b;
        if duplicate {
            tracing::debug!("skipping duplicate slide id {a}");
        }
        duplicate
    });

    entries
        .into_iter()
        .enumerate()
        .map(|(position, (name, src))| Slide::image(name, src, slide_label(name, position)))
        .collect()
}

/// Rebuilds the slide list only when the discovered asset set actually changes.
#[derive(Debug, Default)]
pub struct SlideListBuilder {
    last_assets: Option<AssetMap>,
    generation: u64,
}

impl SlideListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new list when `assets` differs from the previous call, `None` otherwise.
    pub fn rebuild(&mut self, assets: AssetMap) -> Option<SlideList> {
        if self.last_assets.as_ref() == Some(&assets) {
            return None;
        }

        self.generation += 1;
        let list = SlideList::build(&assets, self.generation);
        tracing::info!(
            "built slide list generation {} with {} slide(s)",
            list.generation(),
            list.len()
        );
        self.last_assets = Some(assets);

        Some(list)
    }
}
