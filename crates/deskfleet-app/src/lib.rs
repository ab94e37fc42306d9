// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod assign;
pub mod error;
pub mod forms;
pub mod ids;
pub mod listing;
pub mod model;
pub mod profile;
pub mod state;
pub mod unassign;

pub use assign::*;
pub use error::*;
pub use forms::*;
pub use ids::*;
pub use listing::*;
pub use model::*;
pub use profile::*;
pub use state::*;
pub use unassign::*;
