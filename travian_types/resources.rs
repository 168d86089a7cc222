use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// One of the four resource kinds a village produces and stores.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum ResourceKind {
    Lumber,
    Clay,
    Iron,
    Crop,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Lumber,
        ResourceKind::Clay,
        ResourceKind::Iron,
        ResourceKind::Crop,
    ];
}

/// A quantity of each resource kind. All arithmetic is componentwise; there
/// is no implicit clamping to zero or to any capacity, since "does this fit"
/// questions are answered by [`Resources::fits`] rather than by truncating
/// a subtraction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    pub lumber: f64,
    pub clay: f64,
    pub iron: f64,
    pub crop: f64,
}

impl Resources {
    pub const fn new(lumber: f64, clay: f64, iron: f64, crop: f64) -> Self {
        Self {
            lumber,
            clay,
            iron,
            crop,
        }
    }

    pub const ZERO: Resources = Resources::new(0.0, 0.0, 0.0, 0.0);

    pub fn get(&self, kind: ResourceKind) -> f64 {
        match kind {
            ResourceKind::Lumber => self.lumber,
            ResourceKind::Clay => self.clay,
            ResourceKind::Iron => self.iron,
            ResourceKind::Crop => self.crop,
        }
    }

    pub fn with(&self, kind: ResourceKind, value: f64) -> Self {
        let mut out = *self;
        match kind {
            ResourceKind::Lumber => out.lumber = value,
            ResourceKind::Clay => out.clay = value,
            ResourceKind::Iron => out.iron = value,
            ResourceKind::Crop => out.crop = value,
        }
        out
    }

    pub fn total(&self) -> f64 {
        self.lumber + self.clay + self.iron + self.crop
    }

    /// The componentwise minimum of two amounts.
    pub fn min(&self, other: &Resources) -> Resources {
        Resources::new(
            self.lumber.min(other.lumber),
            self.clay.min(other.clay),
            self.iron.min(other.iron),
            self.crop.min(other.crop),
        )
    }

    /// The componentwise maximum of two amounts.
    pub fn max(&self, other: &Resources) -> Resources {
        Resources::new(
            self.lumber.max(other.lumber),
            self.clay.max(other.clay),
            self.iron.max(other.iron),
            self.crop.max(other.crop),
        )
    }

    /// The resource kind with the smallest amount in `self`, i.e. the one
    /// most likely to bottleneck a requirement. Ties resolve to the first
    /// kind in [`ResourceKind::ALL`] order.
    pub fn min_type(&self) -> ResourceKind {
        ResourceKind::ALL
            .into_iter()
            .min_by(|a, b| self.get(*a).partial_cmp(&self.get(*b)).unwrap())
            .expect("ResourceKind::ALL is non-empty")
    }

    /// Whether `self` has at least as much of every kind as `required`.
    pub fn fits(&self, required: &Resources) -> bool {
        self.lumber >= required.lumber
            && self.clay >= required.clay
            && self.iron >= required.iron
            && self.crop >= required.crop
    }

    /// `fits(need, have)` as an integer count (§3.1): the largest `k` such
    /// that `self` covers `k` copies of `unit_cost`, i.e. `min` over kinds
    /// with a positive requirement of `floor(have_k / need_k)`. A
    /// `unit_cost` with no positive component is a caller error this
    /// repository never makes (every unit has at least one nonzero cost
    /// component), so it returns `u32::MAX` rather than a meaningless 0.
    pub fn affordable_count(&self, unit_cost: &Resources) -> u32 {
        let mut count: Option<u32> = None;
        for kind in ResourceKind::ALL {
            let need = unit_cost.get(kind);
            if need <= 0.0 {
                continue;
            }
            let kind_count = (self.get(kind) / need).floor().clamp(0.0, u32::MAX as f64) as u32;
            count = Some(count.map_or(kind_count, |c| c.min(kind_count)));
        }
        count.unwrap_or(u32::MAX)
    }

    /// Whether no resource kind is present in both `self` and `other`.
    pub fn is_disjoint(&self, other: &Resources) -> bool {
        ResourceKind::ALL
            .into_iter()
            .all(|k| self.get(k) == 0.0 || other.get(k) == 0.0)
    }

    /// Clamp every component of `self` to the matching component of `cap`,
    /// modelling a warehouse/granary capacity ceiling.
    pub fn provide_up_to(&self, cap: &Resources) -> Resources {
        self.min(cap)
    }

    /// Componentwise subtraction, clamped at zero per kind. Useful for
    /// "spend what's available" accounting where overspend must not go
    /// negative.
    pub fn saturating_sub(&self, other: &Resources) -> Resources {
        Resources::new(
            (self.lumber - other.lumber).max(0.0),
            (self.clay - other.clay).max(0.0),
            (self.iron - other.iron).max(0.0),
            (self.crop - other.crop).max(0.0),
        )
    }
}

impl Add for Resources {
    type Output = Resources;

    fn add(self, rhs: Resources) -> Resources {
        Resources::new(
            self.lumber + rhs.lumber,
            self.clay + rhs.clay,
            self.iron + rhs.iron,
            self.crop + rhs.crop,
        )
    }
}

impl Sub for Resources {
    type Output = Resources;

    fn sub(self, rhs: Resources) -> Resources {
        Resources::new(
            self.lumber - rhs.lumber,
            self.clay - rhs.clay,
            self.iron - rhs.iron,
            self.crop - rhs.crop,
        )
    }
}

impl Mul<f64> for Resources {
    type Output = Resources;

    fn mul(self, rhs: f64) -> Resources {
        Resources::new(
            self.lumber * rhs,
            self.clay * rhs,
            self.iron * rhs,
            self.crop * rhs,
        )
    }
}

impl Div<f64> for Resources {
    type Output = Resources;

    fn div(self, rhs: f64) -> Resources {
        Resources::new(
            self.lumber / rhs,
            self.clay / rhs,
            self.iron / rhs,
            self.crop / rhs,
        )
    }
}

#[derive(Debug, Clone)]
pub struct Cost {
    pub resources: Resources,
    pub upkeep: u32,
    pub time: u32,
}

#[derive(Debug, Clone)]
pub struct ResearchCost {
    pub resources: Resources,
    pub time: u64,
}
