use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

use crate::{
    assets::resolver::{AssetResolver, normalize_rel_path},
    composition::model::{Composition, FontFace},
    eval::evaluator::Evaluator,
    foundation::{core::FrameIndex, error::AdreelResult},
};

/// A declared font face and the file it resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedFont {
    /// Face as declared by the composition.
    pub face: FontFace,
    /// Resolved file.
    pub path: PathBuf,
}

/// Proof that a composition's assets were resolved. Obtained once, before any frame is evaluated.
#[derive(Clone, Debug)]
pub struct PreparedAssets {
    comp_id: String,
    fonts: Vec<ResolvedFont>,
    images: BTreeMap<String, PathBuf>,
}

impl PreparedAssets {
    /// Composition the assets belong to.
    pub fn comp_id(&self) -> &str {
        &self.comp_id
    }

    /// Resolved fonts, deduplicated, in declaration order.
    pub fn fonts(&self) -> &[ResolvedFont] {
        &self.fonts
    }

    /// Resolved path of an image, by asset-relative path.
    pub fn image(&self, rel: &str) -> Option<&Path> {
        let norm = normalize_rel_path(rel).ok()?;
        self.images.get(&norm).map(PathBuf::as_path)
    }

    /// All resolved images keyed by normalized path.
    pub fn images(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.images.iter().map(|(k, v)| (k.as_str(), v.as_path()))
    }
}

/// Asset pre-flight entry point.
pub struct Preflight;

impl Preflight {
    /// Resolve declared fonts, then images referenced by the first frame of every scene.
    ///
    /// The first resolution failure is returned unchanged.
    #[tracing::instrument(level = "debug", skip_all, fields(comp = %comp.id()))]
    pub fn run(
        comp: &Composition,
        resolver: &dyn AssetResolver,
        props: Option<&serde_json::Value>,
    ) -> AdreelResult<PreparedAssets> {
        let mut fonts = Vec::with_capacity(comp.fonts().len());
        let mut seen = BTreeSet::new();
        for face in comp.fonts() {
            let norm = normalize_rel_path(&face.src)?;
            if !seen.insert((norm.clone(), face.family.clone(), face.weight)) {
                continue;
            }
            let path = resolver.resolve(&norm)?;
            tracing::debug!(
                family = %face.family,
                weight = face.weight,
                path = %path.display(),
                "font ready"
            );
            fonts.push(ResolvedFont {
                face: face.clone(),
                path,
            });
        }

        let eval = Evaluator::new(comp, props)?;
        let mut images = BTreeMap::new();
        let declared: BTreeSet<&str> = comp.fonts().iter().map(|f| f.family.as_str()).collect();
        for frame in scan_frames(comp) {
            let root = eval.eval_frame(frame)?.root;
            for src in root.asset_refs() {
                let norm = normalize_rel_path(&src)?;
                if images.contains_key(&norm) {
                    continue;
                }
                let path = resolver.resolve(&norm)?;
                images.insert(norm, path);
            }
            for family in root.font_families() {
                if !declared.contains(family.as_str()) {
                    tracing::warn!(
                        %family,
                        frame = frame.0,
                        "text uses a font family with no declared face"
                    );
                }
            }
        }

        tracing::info!(fonts = fonts.len(), images = images.len(), "preflight complete");
        Ok(PreparedAssets {
            comp_id: comp.id().to_owned(),
            fonts,
            images,
        })
    }
}

fn scan_frames(comp: &Composition) -> BTreeSet<FrameIndex> {
    let mut frames = BTreeSet::from([FrameIndex(0)]);
    if let Some(tl) = comp.timeline() {
        frames.extend(
            tl.scenes()
                .iter()
                .filter(|s| s.start < comp.config().duration.0)
                .map(|s| FrameIndex(s.start)),
        );
    }
    frames
}

#[cfg(test)]
#[path = "../../tests/unit/assets/preflight.rs"]
mod tests;
