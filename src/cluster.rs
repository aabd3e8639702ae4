use rayon::prelude::*;

use std::collections::HashSet;

use crate::compat;
use crate::config::{ ClusterConfig, MatchConfig };
use crate::glyph::GlyphCandidate;

/// Glyphs hypothesised to be the characters of one plate.
///
/// Members are indices into the candidate slice the cluster was built from,
/// so identical looking glyphs stay distinct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphCluster {
    members: Vec<usize>,
}

impl GlyphCluster {

    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Look the members up in the slice the cluster was built from.
    /// Indices past the end of `candidates` are skipped.
    pub fn glyphs<'a>(&self, candidates: &'a [GlyphCandidate]) -> Vec<&'a GlyphCandidate> {
        self.members.iter().filter_map(|&i| candidates.get(i)).collect()
    }
}

/// Partition the candidates into disjoint clusters of at least
/// `min_group_size` mutually compatible glyphs.
///
/// Order matters: the first glyph, in slice order, that gathers enough
/// matches anchors a cluster. Candidates left over are dropped.
///
/// Each level is O(n^2) pair checks and there can be O(n) levels, so very
/// noisy images with thousands of blobs get slow here.
pub fn build_clusters(
    candidates: &[GlyphCandidate],
    matching: &MatchConfig,
    config: &ClusterConfig,
) -> Vec<GlyphCluster> {
    let all: Vec<usize> = (0..candidates.len()).collect();
    let clusters = partition(candidates, &all, matching, config);
    log::debug!("{} candidates grouped into {} clusters", candidates.len(), clusters.len());
    clusters
}

fn partition(
    candidates: &[GlyphCandidate],
    remaining: &[usize],
    matching: &MatchConfig,
    config: &ClusterConfig,
) -> Vec<GlyphCluster> {
    let mut clusters = Vec::new();
    for &anchor in remaining {
        let mut group = matches_of(candidates, anchor, remaining, matching);
        group.push(anchor);
        if group.len() < config.min_group_size {
            continue;
        }
        log::trace!("glyph {} anchors a cluster of {}", anchor, group.len());

        let used: HashSet<usize> = group.iter().copied().collect();
        let rest: Vec<usize> = remaining.iter().copied().filter(|i| !used.contains(i)).collect();
        clusters.push(GlyphCluster { members: group });
        clusters.extend(partition(candidates, &rest, matching, config));
        break;
    }
    clusters
}

/// Every other remaining glyph that matches `anchor`, in slice order.
fn matches_of(
    candidates: &[GlyphCandidate],
    anchor: usize,
    remaining: &[usize],
    matching: &MatchConfig,
) -> Vec<usize> {
    let anchor_glyph = &candidates[anchor];
    remaining
        .par_iter()
        .copied()
        .filter(|&other| other != anchor && compat::is_match(anchor_glyph, &candidates[other], matching))
        .collect()
}
