//! The recursive builder: prune by interval, refine, collapse.

use frep_eval::{Evaluator, TapeEvaluator};
use frep_graph::Token;
use frep_types::{Region, Subregion, CORNER_COUNT};
use rayon::prelude::*;
use tracing::info;

use crate::cell::{CellKind, CellType, Octree};
use crate::config::RenderConfig;
use crate::error::RenderResult;

/// Renders a token's expression over a region with the default config.
///
/// Binds a [`TapeEvaluator`] to the token and builds the cell hierarchy.
/// The render is all-or-nothing: an evaluator failure anywhere discards the
/// partial tree.
///
/// # Errors
///
/// Returns [`RenderError::Evaluator`](crate::RenderError::Evaluator) if the
/// expression is malformed over the region.
pub fn render(token: &Token, region: &Region) -> RenderResult<Octree> {
    render_with_config(token, region, &RenderConfig::default())
}

/// Renders a token's expression with an explicit config.
///
/// # Errors
///
/// Returns [`RenderError::Evaluator`](crate::RenderError::Evaluator) if the
/// expression is malformed over the region.
pub fn render_with_config(
    token: &Token,
    region: &Region,
    config: &RenderConfig,
) -> RenderResult<Octree> {
    let evaluator = TapeEvaluator::new(token);
    render_with_evaluator(&evaluator, region, config)
}

/// Renders with a caller-supplied evaluator.
///
/// This is the seam for production evaluators; the builder only ever calls
/// [`Evaluator::bounds_over`] and [`Evaluator::value_at`]. The evaluator
/// must be `Sync` because sibling subtrees may be built on rayon workers.
///
/// # Errors
///
/// Returns [`RenderError::Evaluator`](crate::RenderError::Evaluator) if the
/// evaluator fails anywhere in the recursion.
pub fn render_with_evaluator<E>(
    evaluator: &E,
    region: &Region,
    config: &RenderConfig,
) -> RenderResult<Octree>
where
    E: Evaluator + Sync,
{
    let root = build_cell(evaluator, region.view(), config)?;
    info!(
        level = region.level,
        parallel = config.parallel,
        cell_count = root.cell_count(),
        "render complete"
    );
    Ok(root)
}

/// Decides one cell: prune by interval bound, evaluate corners at the
/// floor, or subdivide.
fn build_cell<E>(evaluator: &E, sub: Subregion, config: &RenderConfig) -> RenderResult<Octree>
where
    E: Evaluator + Sync,
{
    let bound = evaluator.bounds_over(sub.x(), sub.y(), sub.z())?;

    // Negative means inside: a non-negative lower bound proves the whole
    // box outside, a negative upper bound proves it inside.
    if bound.lower() >= 0.0 {
        return Ok(Octree::new(
            sub.x(),
            sub.y(),
            sub.z(),
            [false; CORNER_COUNT],
            CellKind::Empty,
        ));
    }
    if bound.upper() < 0.0 {
        return Ok(Octree::new(
            sub.x(),
            sub.y(),
            sub.z(),
            [true; CORNER_COUNT],
            CellKind::Full,
        ));
    }

    if sub.can_split() {
        return populate_children(evaluator, sub, config);
    }

    // Resolution floor: sample the 8 corners directly.
    let mut corners = [false; CORNER_COUNT];
    for (i, slot) in corners.iter_mut().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let value = evaluator.value_at(sub.corner(i as u8))?;
        *slot = value < 0.0;
    }
    Ok(Octree::new(
        sub.x(),
        sub.y(),
        sub.z(),
        corners,
        collapse_leaf(corners),
    ))
}

/// Octsects and builds the 8 children, then collects corners and collapses.
fn populate_children<E>(
    evaluator: &E,
    sub: Subregion,
    config: &RenderConfig,
) -> RenderResult<Octree>
where
    E: Evaluator + Sync,
{
    let octants = sub.octsect();

    let children = if config.parallel && sub.level() >= config.parallel_min_level {
        let results: Vec<RenderResult<Octree>> = octants
            .par_iter()
            .map(|octant| build_cell(evaluator, *octant, config))
            .collect();
        let mut cells = Vec::with_capacity(CORNER_COUNT);
        for result in results {
            cells.push(result?);
        }
        into_eight(cells)
    } else {
        let mut cells = Vec::with_capacity(CORNER_COUNT);
        for octant in octants {
            cells.push(build_cell(evaluator, octant, config)?);
        }
        into_eight(cells)
    };

    // Child i touches parent corner i, so the shared corner values line up
    // by construction.
    let mut corners = [false; CORNER_COUNT];
    for (i, slot) in corners.iter_mut().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let inside = children[i].corner(i as u8);
        *slot = inside;
    }
    Ok(Octree::new(
        sub.x(),
        sub.y(),
        sub.z(),
        corners,
        collapse_branch(children),
    ))
}

/// All-same-type check: a uniformly Full or Empty set of children replaces
/// the branch outright and the children are dropped.
fn collapse_branch(children: [Octree; 8]) -> CellKind {
    let uniform = |t: CellType| children.iter().all(|c| c.cell_type() == t);
    if uniform(CellType::Full) {
        CellKind::Full
    } else if uniform(CellType::Empty) {
        CellKind::Empty
    } else {
        CellKind::Branch(Box::new(children))
    }
}

/// All-same-sign check at the floor: uniform corners mean the surface does
/// not cross this cell after all.
fn collapse_leaf(corners: [bool; CORNER_COUNT]) -> CellKind {
    if corners == [true; CORNER_COUNT] {
        CellKind::Full
    } else if corners == [false; CORNER_COUNT] {
        CellKind::Empty
    } else {
        CellKind::Leaf
    }
}

fn into_eight(cells: Vec<Octree>) -> [Octree; 8] {
    match <[Octree; 8]>::try_from(cells) {
        Ok(array) => array,
        Err(_) => unreachable!("octsection always yields 8 children"),
    }
}
