use dioxus::prelude::*;

/// Mining-update notice shown above the mining figures.
#[component]
pub fn Announcement() -> Element {
    rsx! {
        div { class: "card border border-yellow-400 space-y-4",
            h3 { class: "text-lg font-bold text-yellow-400", "Important announcement: mining update" }
            div { class: "space-y-3 text-sm text-gray-300",
                p {
                    strong { "Mining stops at 1m total supply. " }
                    "Bots have been farming the miner and selling into every LP top-up, so "
                    "emissions end once supply reaches one million."
                }
                p {
                    "A new $donuette is deployed from a snapshot of holders taken at that point. "
                    "Holders claim "
                    strong { "1:1" }
                    ". House funds and the current LP move into the new LP and are locked."
                }
                ul { class: "list-disc list-inside space-y-1 ml-2",
                    li { "Max supply of 1.2m, with 200k added as liquidity" }
                    li { "LP locked forever" }
                    li { "1:1 claiming against a merkle snapshot" }
                    li { "Anything mined after the snapshot does not count" }
                }
                p { class: "font-bold text-red-400",
                    "Claim the new token on the Migrate page."
                }
            }
        }
    }
}
