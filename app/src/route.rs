use dioxus::prelude::*;

use crate::components::Layout;
use crate::pages::{Migrate, Mining};

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
    #[route("/")]
    Migrate {},  // Migration first - mining is stopped
    #[route("/mining")]
    Mining {},
}
