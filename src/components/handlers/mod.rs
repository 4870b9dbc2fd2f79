//! Component handler implementations
//!
//! Every routed component key is listed in [`create_all_components`].

pub mod confirm;
pub mod dismiss;

use super::handler::ComponentFactory;

/// Keys and constructors of all component handlers
pub fn create_all_components() -> Vec<(&'static str, ComponentFactory)> {
    vec![
        ("confirm", confirm::create as ComponentFactory),
        ("dismiss", dismiss::create as ComponentFactory),
    ]
}
