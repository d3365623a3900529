//! API regression tests for the frep crate ecosystem.
//!
//! These tests pin the public API and the load-bearing semantics of the
//! kernel across the frep-* crates. They are organized in tiers of
//! increasing integration:
//!
//! - Tier 1: Foundation (frep-types: intervals, regions, octant bits)
//! - Tier 2: Expression graph (frep-graph: interning, merging, collapse)
//! - Tier 3: Evaluation (frep-eval: tape evaluator contract)
//! - Tier 4: Octree rendering (frep-octree: pruning, collapse, scenarios)
//!
//! If any of these tests fail after API changes, it indicates a breaking
//! change that needs documentation in CHANGELOG.md and a version bump.

// Allow test-specific patterns
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use approx::assert_relative_eq;
use frep::prelude::*;

/// Unit sphere at the origin: `x² + y² + z² - 1`, negative inside.
fn sphere() -> Token {
    let (x, y, z) = Token::axes();
    &(&(&x.square() + &y.square()) + &z.square()) - &Token::constant(1.0)
}

// =============================================================================
// TIER 1: Foundation - Intervals, Regions, Octant Convention
// =============================================================================

mod tier1_foundation {
    use super::*;
    use frep::types::{corner_point, is_high, AXIS_X, AXIS_Y, AXIS_Z};

    #[test]
    fn interval_arithmetic_basics() {
        let a = Interval::new(-2.0, 3.0);
        let b = Interval::new(1.0, 4.0);
        assert_eq!(a + b, Interval::new(-1.0, 7.0));
        assert_eq!(a - b, Interval::new(-6.0, 2.0));
        assert_eq!(a.square(), Interval::new(0.0, 9.0));
        assert_eq!(a.min(b), Interval::new(-2.0, 3.0));
        assert_eq!(a.max(b), Interval::new(1.0, 4.0));
    }

    #[test]
    fn region_view_and_octsection() {
        let region = Region::cube(Interval::new(-2.0, 2.0), 2);
        let root = region.view();
        let children = root.octsect();

        assert_eq!(children.len(), 8);
        for (i, child) in children.iter().enumerate() {
            assert_eq!(child.level(), 1);
            // Shared corner: child i touches parent corner i exactly.
            let i = u8::try_from(i).unwrap();
            assert_eq!(child.corner(i), root.corner(i));
        }
    }

    #[test]
    fn octant_bits_agree_between_split_and_position() {
        let region = Region::new(
            Interval::new(0.0, 4.0),
            Interval::new(-2.0, 0.0),
            Interval::new(1.0, 9.0),
            1,
        );
        let root = region.view();
        for i in 0..8u8 {
            let p = root.corner(i);
            assert_eq!(p, corner_point(root.x(), root.y(), root.z(), i));
            let pick = |v: Interval, axis: u8| if is_high(i, axis) { v.upper() } else { v.lower() };
            assert_relative_eq!(p.x, pick(root.x(), AXIS_X));
            assert_relative_eq!(p.y, pick(root.y(), AXIS_Y));
            assert_relative_eq!(p.z, pick(root.z(), AXIS_Z));
        }
    }
}

// =============================================================================
// TIER 2: Expression Graph - Interning, Merging, Collapse
// =============================================================================

mod tier2_graph {
    use super::*;

    #[test]
    fn dedup_idempotence() {
        let x = Token::x();
        let before = x.tree().len();
        let a = x.square();
        let b = x.square();
        assert_eq!(a.id(), b.id());
        assert_eq!(x.tree().len(), before + 1);
    }

    #[test]
    fn merge_two_constants_and_collapse() {
        let three = Token::constant(3.0);
        let four = Token::constant(4.0);
        let sum = Token::operation(Opcode::Add, Some(&three), Some(&four));

        // Merging flowed into the left tree; the donor is untouched.
        assert!(Token::same_tree(&sum, &three));
        assert!(!Token::same_tree(&sum, &four));

        let folded = sum.collapse();
        assert_relative_eq!(folded.value().unwrap(), 7.0);
    }

    #[test]
    fn merge_preserves_semantics() {
        // f and g built on independent trees; f+g must evaluate to the sum.
        let f = {
            let x = Token::x();
            x.square()
        };
        let g = {
            let x = Token::x();
            &x + &Token::constant(2.0)
        };
        let combined = Token::operation(Opcode::Add, Some(&f), Some(&g));

        let eval = TapeEvaluator::new(&combined);
        for p in [-2.0, 0.0, 0.5, 3.0] {
            let expected = p * p + (p + 2.0);
            assert_relative_eq!(eval.value_at(Point3::new(p, 0.0, 0.0)).unwrap(), expected);
        }
    }

    #[test]
    fn merge_avoids_duplicating_shared_substructure() {
        let f = Token::x().square();
        let g = Token::x().square();
        let sum = Token::operation(Opcode::Add, Some(&f), Some(&g));
        // x and x² exist once each: 2 shared nodes + 1 Add.
        assert_eq!(sum.tree().len(), 3);
        assert_eq!(sum.lhs(), sum.rhs());
    }

    #[test]
    fn affine_axes_fold_linearly() {
        let (x, y, _z) = Token::axes();
        let form = (&x + &y).collapse();
        assert_eq!(form.affine_form().unwrap(), AffineForm::new(1.0, 1.0, 0.0, 0.0));

        let scaled = (&form * &Token::constant(2.0)).collapse();
        assert_eq!(scaled.affine_form().unwrap(), AffineForm::new(2.0, 2.0, 0.0, 0.0));
    }

    #[test]
    fn rank_bookkeeping() {
        let x = Token::x();
        let sq = x.square();
        let sum = &sq + &x;
        assert_eq!(x.rank(), 0);
        assert_eq!(sq.rank(), 1);
        assert_eq!(sum.rank(), 2);
    }

    #[test]
    fn typed_failures_on_wrong_variant_queries() {
        let x = Token::x();
        assert!(matches!(x.value(), Err(GraphError::NotConstant { .. })));
        assert!(matches!(x.affine_form(), Err(GraphError::NotAffine { .. })));
    }
}

// =============================================================================
// TIER 3: Evaluation - The TapeEvaluator Contract
// =============================================================================

mod tier3_eval {
    use super::*;

    #[test]
    fn bounds_enclose_sampled_values() {
        let eval = TapeEvaluator::new(&sphere());
        let extent = Interval::new(-2.0, 2.0);
        let bound = eval.bounds_over(extent, extent, extent).unwrap();

        let mut coords = Vec::new();
        let mut c = -2.0;
        while c <= 2.0 {
            coords.push(c);
            c += 0.5;
        }
        for &px in &coords {
            for &py in &coords {
                for &pz in &coords {
                    let v = eval.value_at(Point3::new(px, py, pz)).unwrap();
                    assert!(bound.contains(v), "{v} escapes {bound:?}");
                }
            }
        }
    }

    #[test]
    fn csg_min_max_evaluate_as_union_intersection() {
        let a = Token::affine(1.0, 0.0, 0.0, 0.0); // x
        let b = Token::affine(0.0, 1.0, 0.0, 0.0); // y
        let union = a.min(&b);
        let intersection = a.max(&b);

        let u = TapeEvaluator::new(&union);
        let i = TapeEvaluator::new(&intersection);
        let p = Point3::new(-1.0, 2.0, 0.0);
        assert_relative_eq!(u.value_at(p).unwrap(), -1.0);
        assert_relative_eq!(i.value_at(p).unwrap(), 2.0);
    }

    #[test]
    fn malformed_expression_is_a_typed_error() {
        let zero = Token::constant(0.0);
        let bad = &zero / &zero;
        let eval = TapeEvaluator::new(&bad);
        assert!(matches!(
            eval.value_at(Point3::new(0.0, 0.0, 0.0)),
            Err(EvalError::NonFiniteValue { .. })
        ));
    }
}

// =============================================================================
// TIER 4: Octree Rendering - Pruning, Collapse, Scenarios
// =============================================================================

mod tier4_octree {
    use super::*;

    fn sequential() -> RenderConfig {
        RenderConfig::default().with_parallel(false)
    }

    #[test]
    fn scenario_sphere_single_split() {
        let region = Region::cube(Interval::new(-2.0, 2.0), 1);
        let tree = render(&sphere(), &region).unwrap();

        // Root bound straddles zero, so the root is a Branch; every octant
        // touches the origin, so all children keep a sign change.
        assert_eq!(tree.cell_type(), CellType::Branch);
        for i in 0..8u8 {
            let child = tree.child(i).unwrap();
            assert_eq!(child.cell_type(), CellType::Leaf);
            assert!(child.corner(i ^ 7), "origin corner of octant {i} is inside");
        }
    }

    #[test]
    fn scenario_disjoint_shape_far_outside() {
        let region = Region::cube(Interval::new(10.0, 12.0), 5);
        let tree = render(&sphere(), &region).unwrap();
        assert_eq!(tree.cell_type(), CellType::Empty);
        assert_eq!(tree.cell_count(), 1);
        assert!(tree.child(0).is_none());
    }

    #[test]
    fn scenario_sphere_level_two_census() {
        let region = Region::cube(Interval::new(-2.0, 2.0), 2);
        let tree = render_with_config(&sphere(), &region, &sequential()).unwrap();

        assert_eq!(tree.cell_type(), CellType::Branch);
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.cell_count(), 1 + 8 + 64);

        // Every octant of the root still straddles the surface.
        let mut leaves = 0;
        let mut empties = 0;
        for i in 0..8u8 {
            let child = tree.child(i).unwrap();
            assert_eq!(child.cell_type(), CellType::Branch);
            for j in 0..8u8 {
                match child.child(j).unwrap().cell_type() {
                    CellType::Leaf => leaves += 1,
                    CellType::Empty => empties += 1,
                    other => panic!("unexpected grandchild type {other:?}"),
                }
            }
        }
        // Per octant exactly one unit cube touches the origin and keeps a
        // sign change; the other seven are proven outside.
        assert_eq!(leaves, 8);
        assert_eq!(empties, 56);
    }

    #[test]
    fn octree_type_invariant_holds_everywhere() {
        let region = Region::cube(Interval::new(-2.0, 2.0), 3);
        let tree = render(&sphere(), &region).unwrap();
        for cell in tree.iter() {
            let present = (0..8).filter(|&i| cell.child(i).is_some()).count();
            match cell.cell_type() {
                CellType::Branch => assert_eq!(present, 8),
                CellType::Leaf => assert_eq!(present, 0),
                CellType::Empty => {
                    assert_eq!(present, 0);
                    assert!((0..8).all(|i| !cell.corner(i)));
                }
                CellType::Full => {
                    assert_eq!(present, 0);
                    assert!((0..8).all(|i| cell.corner(i)));
                }
            }
        }
    }

    #[test]
    fn corner_position_consistency_across_levels() {
        let region = Region::cube(Interval::new(-2.0, 2.0), 2);
        let tree = render_with_config(&sphere(), &region, &sequential()).unwrap();
        for cell in tree.iter() {
            if cell.cell_type() != CellType::Branch {
                continue;
            }
            for i in 0..8u8 {
                let child = cell.child(i).unwrap();
                assert_eq!(cell.pos(i), child.pos(i));
                assert_eq!(cell.corner(i), child.corner(i));
            }
        }
    }

    #[test]
    fn collapse_to_uniform_empty_and_full() {
        let x = Token::x();
        let zero = &x - &x;
        let region = Region::cube(Interval::new(-1.0, 1.0), 3);
        let tree = render_with_config(&zero, &region, &sequential()).unwrap();
        assert_eq!(tree.cell_type(), CellType::Empty);
        assert_eq!(tree.cell_count(), 1);

        let inside = &(-&(&x - &x)) - &Token::constant(1.0);
        let tree = render_with_config(&inside, &region, &sequential()).unwrap();
        assert_eq!(tree.cell_type(), CellType::Full);
        assert_eq!(tree.cell_count(), 1);
    }

    #[test]
    fn render_abort_returns_no_partial_tree() {
        let zero = Token::constant(0.0);
        let bad = &zero / &zero;
        let region = Region::cube(Interval::new(-1.0, 1.0), 3);
        let result = render(&bad, &region);
        assert!(matches!(result, Err(RenderError::Evaluator(_))));
    }

    #[test]
    fn csg_union_renders_both_lobes() {
        // Two small spheres on opposite sides of the origin; their union
        // must be inside at both centers and outside in between.
        let ball = |cx: f64| {
            let (x, y, z) = Token::axes();
            let dx = &x - &Token::constant(cx);
            &(&(&dx.square() + &y.square()) + &z.square()) - &Token::constant(0.25)
        };
        let union = ball(-1.0).min(&ball(1.0));

        let eval = TapeEvaluator::new(&union);
        assert!(eval.value_at(Point3::new(-1.0, 0.0, 0.0)).unwrap() < 0.0);
        assert!(eval.value_at(Point3::new(1.0, 0.0, 0.0)).unwrap() < 0.0);
        assert!(eval.value_at(Point3::new(0.0, 0.0, 0.0)).unwrap() > 0.0);

        let region = Region::cube(Interval::new(-2.0, 2.0), 3);
        let tree = render(&union, &region).unwrap();
        assert_eq!(tree.cell_type(), CellType::Branch);
        let full_or_leaf = tree
            .iter()
            .filter(|c| matches!(c.cell_type(), CellType::Full | CellType::Leaf))
            .count();
        assert!(full_or_leaf > 0);
    }
}
