//! Body bookkeeping behind TruckKernel handles.
//!
//! A stored solid is a list of bodies. Each body is one or more single-shell
//! truck solids. A body holds several shells only when truck could not fuse
//! overlapping parts; they are kept side by side so the model stays whole.

use tracing::{debug, warn};
use truck_modeling::topology::Solid;
use truck_modeling::Vector3;

use crate::primitives;
use crate::types::KernelError;

/// Tolerances handed to truck's boolean, tried in order until one succeeds.
pub const BOOLEAN_TOLERANCES: [f64; 3] = [0.05, 0.02, 0.01];

/// One connected piece of a model.
#[derive(Clone, Debug)]
pub(crate) struct Body {
    shells: Vec<Solid>,
}

/// Every body of one kernel solid.
#[derive(Clone, Debug)]
pub(crate) struct Bodies {
    bodies: Vec<Body>,
}

enum Contact {
    Fused(Solid),
    Apart,
    Unfusable,
}

fn single_shell_solids(solid: Solid) -> Result<Vec<Solid>, KernelError> {
    let shells = solid.into_boundaries();
    if shells.is_empty() {
        return Err(KernelError::BooleanFailed {
            reason: "solid has no boundary shells".to_string(),
        });
    }
    shells
        .into_iter()
        .map(|shell| {
            Solid::try_new(vec![shell]).map_err(|e| KernelError::BooleanFailed {
                reason: format!("shell is not a closed solid: {}", e),
            })
        })
        .collect()
}

fn union_any_tolerance(a: &Solid, b: &Solid) -> Option<Solid> {
    BOOLEAN_TOLERANCES
        .iter()
        .find_map(|&tolerance| truck_shapeops::or(a, b, tolerance))
}

fn contact(a: &Solid, b: &Solid) -> Contact {
    match union_any_tolerance(a, b) {
        Some(result) if result.boundaries().len() == 1 => Contact::Fused(result),
        Some(result) if result.boundaries().len() > 1 => Contact::Apart,
        _ => Contact::Unfusable,
    }
}

impl Body {
    /// Fuse `other` into this body. Gives both back unchanged when no shell
    /// of `other` meets a shell of `self`.
    fn join(mut self, other: Body) -> Result<Body, (Body, Body)> {
        let original = self.shells.len();
        let mut touching = false;
        for shell in &other.shells {
            let mut current = shell.clone();
            let mut rest = Vec::with_capacity(self.shells.len() + 1);
            for existing in std::mem::take(&mut self.shells) {
                match contact(&existing, &current) {
                    Contact::Fused(fused) => {
                        current = fused;
                        touching = true;
                    }
                    Contact::Apart => rest.push(existing),
                    Contact::Unfusable => {
                        rest.push(existing);
                        touching = true;
                    }
                }
            }
            rest.push(current);
            self.shells = rest;
        }
        if touching {
            Ok(self)
        } else {
            // Nothing fused, so the first `original` shells are ours in order.
            self.shells.truncate(original);
            Err((self, other))
        }
    }
}

fn absorb(bodies: Vec<Body>, incoming: Body) -> Vec<Body> {
    let mut joined = incoming;
    let mut apart = Vec::with_capacity(bodies.len() + 1);
    for body in bodies {
        match joined.join(body) {
            Ok(merged) => joined = merged,
            Err((kept, body)) => {
                joined = kept;
                apart.push(body);
            }
        }
    }
    apart.push(joined);
    apart
}

impl Bodies {
    /// Split a truck solid into one body per boundary shell.
    pub(crate) fn from_solid(solid: Solid) -> Result<Self, KernelError> {
        let bodies = single_shell_solids(solid)?
            .into_iter()
            .map(|shell| Body {
                shells: vec![shell],
            })
            .collect();
        Ok(Self { bodies })
    }

    pub(crate) fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub(crate) fn shell_count(&self) -> usize {
        self.bodies.iter().map(|b| b.shells.len()).sum()
    }

    pub(crate) fn face_count(&self) -> usize {
        self.shells()
            .flat_map(|s| s.boundaries().iter())
            .map(|shell| shell.face_iter().count())
            .sum()
    }

    /// Every single-shell solid, body by body.
    pub(crate) fn shells(&self) -> impl Iterator<Item = &Solid> + '_ {
        self.bodies.iter().flat_map(|b| b.shells.iter())
    }

    pub(crate) fn translated(&self, offset: Vector3) -> Self {
        let bodies = self
            .bodies
            .iter()
            .map(|body| Body {
                shells: body
                    .shells
                    .iter()
                    .map(|s| primitives::translated(s, offset))
                    .collect(),
            })
            .collect();
        Self { bodies }
    }

    /// All shells as one truck solid, when every body is fully fused.
    fn as_fused_solid(&self) -> Option<Solid> {
        if self.bodies.iter().any(|b| b.shells.len() != 1) {
            return None;
        }
        let shells = self
            .shells()
            .flat_map(|s| s.boundaries().iter().cloned())
            .collect();
        Solid::try_new(shells).ok()
    }

    /// Boolean union.
    ///
    /// The whole union goes to truck in one call first. If truck gives up,
    /// shells are fused pair by pair; overlapping pairs that still fail stay
    /// in one body as separate shells.
    pub(crate) fn union(&self, other: &Bodies) -> Result<Bodies, KernelError> {
        if let (Some(a), Some(b)) = (self.as_fused_solid(), other.as_fused_solid()) {
            if let Some(result) = union_any_tolerance(&a, &b) {
                return Bodies::from_solid(result);
            }
            debug!("whole union failed, fusing shell by shell");
        }

        let mut bodies = self.bodies.clone();
        for body in &other.bodies {
            bodies = absorb(bodies, body.clone());
        }
        let result = Bodies { bodies };
        let unfused = result.shell_count() - result.body_count();
        if unfused > 0 {
            warn!(unfused, "kept overlapping shells that truck could not fuse");
        }
        Ok(result)
    }
}
