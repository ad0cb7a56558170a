//! Custom page serving: path resolution, tenant lookup, containment,
//! authorization and the dispatcher tying them together.

pub mod authorization;
pub mod containment;
pub mod dispatcher;
pub mod locator;
pub mod path;
pub mod renderer;

pub use authorization::AuthorizationGate;
pub use containment::is_in_folder;
pub use dispatcher::{CustomPageDispatcher, PageRequest};
pub use locator::{PageDirectory, TenantPageLocator};
pub use path::{PagePath, PageTarget};
pub use renderer::{BundlePageRenderer, PageRenderer};
