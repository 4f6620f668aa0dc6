//! Distributed addon registration.
//!
//! Addons defined anywhere in the final binary can submit themselves:
//!
//! ```rust,ignore
//! fn blog() -> Box<dyn Addon> {
//!     Box::new(Blog)
//! }
//!
//! hookwire::inventory::submit! {
//!     hookwire::AddonRegistration::new("blog", 10, blog)
//! }
//! ```
//!
//! and [`App::bootstrap_collected`](crate::App::bootstrap_collected) picks
//! them up.

use crate::app::Addon;

/// An addon submitted with `inventory::submit!`.
pub struct AddonRegistration {
    /// Name used to break ties between equal orders.
    pub name: &'static str,
    /// Registration order; lower registers first.
    pub order: i32,
    /// Builds the addon.
    pub factory: fn() -> Box<dyn Addon>,
}

impl AddonRegistration {
    /// Describes a collected addon.
    pub const fn new(name: &'static str, order: i32, factory: fn() -> Box<dyn Addon>) -> Self {
        Self {
            name,
            order,
            factory,
        }
    }
}

inventory::collect!(AddonRegistration);

/// All submitted addons, ordered by `order` then name.
pub fn collected_addons() -> Vec<&'static AddonRegistration> {
    let mut entries: Vec<&'static AddonRegistration> =
        inventory::iter::<AddonRegistration>.into_iter().collect();
    entries.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(b.name)));
    entries
}
