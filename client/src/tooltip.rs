use leptos::prelude::*;

use explorer_shared::Tooltip;

/// Floating region name that follows the pointer while a shape is hovered.
#[component]
pub fn RegionTooltip(tooltip: RwSignal<Option<Tooltip>>) -> impl IntoView {
    view! {
        {move || {
            tooltip.get().map(|tip| {
                view! {
                    <div
                        class="county-tooltip"
                        style:left=format!("{}px", tip.pos.x)
                        style:top=format!("{}px", tip.pos.y)
                        style="position: fixed; pointer-events: none; z-index: 100;"
                    >
                        {tip.text}
                    </div>
                }
            })
        }}
    }
}
