use std::rc::Rc;

use dioxus::prelude::*;

use crate::components::WalletButton;
use crate::route::Route;
use crate::Deployment;

#[component]
pub fn Layout() -> Element {
    let deployment = use_context::<Rc<Deployment>>();
    let claim = deployment.config.claim;
    let miner = deployment.config.miner;

    rsx! {
        div { class: "min-h-screen",
            style: "background-color: var(--surface-base);",
            // Navigation
            nav { class: "border-b elevated-border backdrop-blur sticky top-0 z-50",
                style: "background-color: var(--surface-base);",
                div { class: "max-w-7xl mx-auto px-4 sm:px-6 lg:px-8",
                    div { class: "flex justify-between h-16",
                        div { class: "flex items-center",
                            Link { to: Route::Migrate {}, class: "flex items-center space-x-2",
                                span { class: "text-2xl font-bold text-donut-400", "DONETTE" }
                            }
                        }

                        div { class: "hidden sm:flex sm:items-center sm:space-x-8",
                            NavLink { to: Route::Migrate {}, label: "Migrate" }
                            NavLink { to: Route::Mining {}, label: "Mining" }
                        }

                        div { class: "flex items-center",
                            WalletButton {}
                        }
                    }
                }
            }

            main { class: "max-w-3xl mx-auto px-4 sm:px-6 lg:px-8 py-8",
                Outlet::<Route> {}
            }

            footer { class: "border-t elevated-border py-8 mt-auto",
                div { class: "max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 text-center text-low",
                    p { "Donette - mined with DONUT" }
                    p { class: "text-sm mt-2",
                        "Claim: "
                        code { class: "text-gold", "{claim}" }
                    }
                    p { class: "text-sm mt-1",
                        "Miner: "
                        code { class: "text-gold", "{miner}" }
                    }
                }
            }
        }
    }
}

#[component]
fn NavLink(to: Route, label: &'static str) -> Element {
    rsx! {
        Link {
            to: to,
            class: "text-mid hover:text-gold px-3 py-2 text-sm font-medium transition-colors",
            "{label}"
        }
    }
}
