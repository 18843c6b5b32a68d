//! Two-variable linear programming by the graphical (corner-point) method.
//!
//! Optimizes c_x·x + c_y·y subject to constraints a·x + b·y {≤, ≥, =} rhs
//! and the implicit bounds x ≥ 0, y ≥ 0.
//!
//! # Algorithm
//!
//! 1. Treat every constraint, then x = 0 and y = 0, as a line.
//! 2. Intersect every pair of lines by Cramer's rule, skipping pairs with
//!    |det| < 1e-10.
//! 3. Keep intersections that satisfy every constraint within 1e-6 and have
//!    x, y ≥ −1e-10 (clamped to 0).
//! 4. Drop points within 1e-6 of an earlier point in both coordinates.
//! 5. Scan the vertices for the best objective; ties go to the first found.
//!
//! By the corner-point theorem a bounded optimum lies on one of these
//! vertices. Before reporting it the recession directions of the region
//! are checked, and an objective that improves along one of them is
//! reported as unbounded.
//!
//! # Examples
//!
//! ```
//! use u_statlab::linprog::{solve_graphical, Constraint, Direction, Objective};
//!
//! // maximize 3x + 2y  s.t.  x + y ≤ 4,  2x + y ≤ 6
//! let objective = Objective::new(3.0, 2.0, Direction::Maximize);
//! let constraints = [Constraint::less_eq(1.0, 1.0, 4.0), Constraint::less_eq(2.0, 1.0, 6.0)];
//! let solution = solve_graphical(&objective, &constraints).unwrap();
//!
//! let best = solution.optimum();
//! assert!((best.x - 2.0).abs() < 1e-9 && (best.y - 2.0).abs() < 1e-9);
//! assert!((best.objective_value - 10.0).abs() < 1e-9);
//! ```

use crate::error::StatResult;
use crate::validate;

/// Pairs of lines with |det| below this are treated as parallel.
pub const DETERMINANT_EPSILON: f64 = 1e-10;

/// Slack allowed when checking a point against a constraint, and the
/// distance under which two vertices are considered the same point.
pub const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Slack allowed on x ≥ 0 and y ≥ 0 before clamping.
pub const NON_NEGATIVITY_SLACK: f64 = 1e-10;

/// Constraint relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// a·x + b·y ≤ rhs
    LessEq,
    /// a·x + b·y ≥ rhs
    GreaterEq,
    /// a·x + b·y = rhs
    Equal,
}

/// A linear constraint a·x + b·y (relation) rhs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraint {
    /// Coefficient of x.
    pub a: f64,
    /// Coefficient of y.
    pub b: f64,
    /// Relation between the left-hand side and `rhs`.
    pub relation: Relation,
    /// Right-hand side.
    pub rhs: f64,
}

impl Constraint {
    /// Builds a·x + b·y (relation) rhs.
    pub fn new(a: f64, b: f64, relation: Relation, rhs: f64) -> Self {
        Self {
            a,
            b,
            relation,
            rhs,
        }
    }

    /// a·x + b·y ≤ rhs
    pub fn less_eq(a: f64, b: f64, rhs: f64) -> Self {
        Self::new(a, b, Relation::LessEq, rhs)
    }

    /// a·x + b·y ≥ rhs
    pub fn greater_eq(a: f64, b: f64, rhs: f64) -> Self {
        Self::new(a, b, Relation::GreaterEq, rhs)
    }

    /// a·x + b·y = rhs
    pub fn equal(a: f64, b: f64, rhs: f64) -> Self {
        Self::new(a, b, Relation::Equal, rhs)
    }

    fn lhs(&self, x: f64, y: f64) -> f64 {
        self.a * x + self.b * y
    }

    /// Whether (x, y) satisfies the constraint within `tol`.
    pub fn is_satisfied(&self, x: f64, y: f64, tol: f64) -> bool {
        let gap = self.lhs(x, y) - self.rhs;
        match self.relation {
            Relation::LessEq => gap <= tol,
            Relation::GreaterEq => gap >= -tol,
            Relation::Equal => gap.abs() <= tol,
        }
    }
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Largest objective value wins (the default).
    #[default]
    Maximize,
    /// Smallest objective value wins.
    Minimize,
}

impl Direction {
    fn improves(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Direction::Maximize => candidate > incumbent,
            Direction::Minimize => candidate < incumbent,
        }
    }
}

/// Objective c_x·x + c_y·y and its direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Objective {
    /// Coefficient of x.
    pub cx: f64,
    /// Coefficient of y.
    pub cy: f64,
    /// Whether to maximize or minimize.
    pub direction: Direction,
}

impl Objective {
    /// Builds c_x·x + c_y·y with the given direction.
    pub fn new(cx: f64, cy: f64, direction: Direction) -> Self {
        Self { cx, cy, direction }
    }

    /// Objective value at (x, y).
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        self.cx * x + self.cy * y
    }
}

/// A feasible corner of the region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LpVertex {
    /// x coordinate, never negative.
    pub x: f64,
    /// y coordinate, never negative.
    pub y: f64,
    /// Objective evaluated at (x, y).
    pub objective_value: f64,
    /// Set on exactly one vertex of a solution.
    pub is_optimal: bool,
}

/// Every distinct feasible vertex, in discovery order, with the optimum
/// marked.
#[derive(Debug, Clone, PartialEq)]
pub struct LpSolution {
    /// Distinct feasible vertices in the order they were found.
    pub vertices: Vec<LpVertex>,
    /// Position of the optimal vertex in `vertices`.
    pub optimal_index: usize,
}

impl LpSolution {
    /// The optimal vertex.
    pub fn optimum(&self) -> &LpVertex {
        &self.vertices[self.optimal_index]
    }
}

/// Solves a two-variable LP over x, y ≥ 0 by vertex enumeration.
///
/// # Errors
///
/// - `InvalidInput` for a non-finite coefficient or right-hand side
/// - `Infeasible` when no feasible vertex exists
/// - `Unbounded` when the objective improves without limit over the region
///
/// # Examples
///
/// ```
/// use u_statlab::error::StatError;
/// use u_statlab::linprog::{solve_graphical, Constraint, Direction, Objective};
///
/// // x + y = 2 and x + y = 5 cannot both hold
/// let objective = Objective::new(1.0, 1.0, Direction::Maximize);
/// let constraints = [Constraint::equal(1.0, 1.0, 2.0), Constraint::equal(1.0, 1.0, 5.0)];
/// assert!(matches!(
///     solve_graphical(&objective, &constraints),
///     Err(StatError::Infeasible { .. })
/// ));
/// ```
pub fn solve_graphical(objective: &Objective, constraints: &[Constraint]) -> StatResult<LpSolution> {
    validate::finite("cx", objective.cx)?;
    validate::finite("cy", objective.cy)?;
    for c in constraints {
        validate::finite("a", c.a)?;
        validate::finite("b", c.b)?;
        validate::finite("rhs", c.rhs)?;
    }

    let mut lines: Vec<Constraint> = constraints.to_vec();
    lines.push(Constraint::greater_eq(1.0, 0.0, 0.0));
    lines.push(Constraint::greater_eq(0.0, 1.0, 0.0));

    let mut candidates = 0_usize;
    let mut feasible = 0_usize;
    let mut vertices: Vec<LpVertex> = Vec::new();

    for i in 0..lines.len() {
        for j in (i + 1)..lines.len() {
            let Some((x, y)) = intersect(&lines[i], &lines[j]) else {
                continue;
            };
            candidates += 1;

            if x < -NON_NEGATIVITY_SLACK || y < -NON_NEGATIVITY_SLACK {
                continue;
            }
            if !constraints
                .iter()
                .all(|c| c.is_satisfied(x, y, FEASIBILITY_TOLERANCE))
            {
                continue;
            }
            feasible += 1;

            let (x, y) = (clamp_non_negative(x), clamp_non_negative(y));
            let duplicate = vertices.iter().any(|v| {
                (v.x - x).abs() < FEASIBILITY_TOLERANCE && (v.y - y).abs() < FEASIBILITY_TOLERANCE
            });
            if !duplicate {
                vertices.push(LpVertex {
                    x,
                    y,
                    objective_value: objective.evaluate(x, y),
                    is_optimal: false,
                });
            }
        }
    }

    log::debug!(
        "graphical LP: {} intersections, {} feasible, {} distinct vertices",
        candidates,
        feasible,
        vertices.len()
    );

    if vertices.is_empty() {
        return validate::infeasible("no point satisfies every constraint");
    }

    if let Some((dx, dy)) = improving_ray(objective, constraints) {
        return validate::unbounded(format!(
            "objective improves without limit along direction ({}, {})",
            dx, dy
        ));
    }

    let mut optimal_index = 0;
    for (k, v) in vertices.iter().enumerate().skip(1) {
        if objective
            .direction
            .improves(v.objective_value, vertices[optimal_index].objective_value)
        {
            optimal_index = k;
        }
    }
    vertices[optimal_index].is_optimal = true;

    Ok(LpSolution {
        vertices,
        optimal_index,
    })
}

/// Cramer's rule for the two boundary lines; `None` if they are parallel.
fn intersect(p: &Constraint, q: &Constraint) -> Option<(f64, f64)> {
    let det = p.a * q.b - q.a * p.b;
    if det.abs() < DETERMINANT_EPSILON {
        return None;
    }
    let x = (p.rhs * q.b - q.rhs * p.b) / det;
    let y = (p.a * q.rhs - q.a * p.rhs) / det;
    Some((x, y))
}

fn clamp_non_negative(v: f64) -> f64 {
    if v <= 0.0 {
        0.0
    } else {
        v
    }
}

/// Returns an extreme ray of the recession cone along which the objective
/// strictly improves.
///
/// In two dimensions the cone's extreme rays lie on an axis or run along a
/// constraint boundary, so (1, 0), (0, 1) and ±(b, −a) per constraint cover
/// them all. Rays, constraint rows and the objective are compared as unit
/// vectors so the tolerances do not depend on coefficient scale.
fn improving_ray(objective: &Objective, constraints: &[Constraint]) -> Option<(f64, f64)> {
    let c_norm = objective.cx.hypot(objective.cy);
    if c_norm == 0.0 {
        return None;
    }

    let mut rays = vec![(1.0, 0.0), (0.0, 1.0)];
    for c in constraints {
        let norm = c.a.hypot(c.b);
        if norm > 0.0 {
            rays.push((c.b / norm, -c.a / norm));
            rays.push((-c.b / norm, c.a / norm));
        }
    }

    rays.into_iter().find(|&(dx, dy)| {
        let in_cone = dx >= -NON_NEGATIVITY_SLACK
            && dy >= -NON_NEGATIVITY_SLACK
            && constraints.iter().all(|c| {
                let norm = c.a.hypot(c.b);
                if norm == 0.0 {
                    return true;
                }
                let row = Constraint::new(c.a / norm, c.b / norm, c.relation, 0.0);
                row.is_satisfied(dx, dy, DETERMINANT_EPSILON)
            });
        let gain = objective.evaluate(dx, dy) / c_norm;
        in_cone
            && match objective.direction {
                Direction::Maximize => gain > DETERMINANT_EPSILON,
                Direction::Minimize => gain < -DETERMINANT_EPSILON,
            }
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn packing_constraints() -> impl Strategy<Value = Vec<Constraint>> {
        proptest::collection::vec(
            (0.1_f64..10.0, 0.1_f64..10.0, 1.0_f64..100.0)
                .prop_map(|(a, b, rhs)| Constraint::less_eq(a, b, rhs)),
            1..6,
        )
    }

    proptest! {
        #[test]
        fn vertices_are_feasible_and_optimum_dominates(
            constraints in packing_constraints(),
            cx in -10.0_f64..10.0,
            cy in -10.0_f64..10.0,
            maximize in any::<bool>(),
        ) {
            let direction = if maximize { Direction::Maximize } else { Direction::Minimize };
            let objective = Objective::new(cx, cy, direction);
            // origin is feasible and every constraint caps both x and y
            let sol = solve_graphical(&objective, &constraints).unwrap();

            for v in &sol.vertices {
                prop_assert!(v.x >= 0.0 && v.y >= 0.0);
                for c in &constraints {
                    prop_assert!(c.is_satisfied(v.x, v.y, 1e-6));
                }
            }
            let best = sol.optimum().objective_value;
            for v in &sol.vertices {
                match direction {
                    Direction::Maximize => prop_assert!(v.objective_value <= best),
                    Direction::Minimize => prop_assert!(v.objective_value >= best),
                }
            }
            prop_assert_eq!(sol.vertices.iter().filter(|v| v.is_optimal).count(), 1);
        }
    }
}
