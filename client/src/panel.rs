use std::any::Any;

use gloo_timers::callback::Timeout;
use leptos::mount::mount_to;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlImageElement};

use explorer_shared::metadata::{Card, Phrase};
use explorer_shared::panel::{RevealOnce, stagger_delays};
use explorer_shared::{DetailSink, PanelContent};

use crate::config::{
    AREA_ID, ATTRACTIONS_ID, DESCRIPTION_ID, DETAILS_ID, DIALECT_ID, ENGLISH_ID, FOOD_ID,
    FUN_FACT_ID, IMAGE_CONTAINER_ID, IMAGE_ID, INSTRUCTIONS_ID, NAME_ID, PHRASES_ID,
    POPULATION_ID, REGION_ID, SLOGAN_ID, TAB_CONTENT_SELECTOR,
};

#[component]
fn CardList(cards: Vec<Card>) -> impl IntoView {
    cards
        .into_iter()
        .map(|card| {
            view! {
                <div class="bg-white rounded-xl shadow-sm overflow-hidden flex hover:shadow-md transition-shadow">
                    <div class="w-1/3">
                        <img src=card.image alt=card.name.clone() class="w-full h-full object-cover" />
                    </div>
                    <div class="w-2/3 p-3">
                        <h4 class="font-medium text-neutral-800">{card.name}</h4>
                        <p class="text-sm text-neutral-600 mt-1">{card.description}</p>
                    </div>
                </div>
            }
        })
        .collect_view()
}

#[component]
fn PhraseList(phrases: Vec<Phrase>) -> impl IntoView {
    phrases
        .into_iter()
        .map(|p| {
            view! {
                <div class="dialect-bubble">
                    <p class="font-medium">{p.phrase}</p>
                    <p class="text-sm text-neutral-500">{p.meaning}</p>
                </div>
            }
        })
        .collect_view()
}

/// Detail panel backed by the page's fixed slots.
pub struct DomPanel {
    document: Document,
    reveal: RevealOnce,
    // Dropping a handle unmounts the list it rendered.
    lists: Vec<Box<dyn Any>>,
    fades: Vec<Timeout>,
}

impl DomPanel {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            reveal: RevealOnce::default(),
            lists: Vec::new(),
            fades: Vec::new(),
        }
    }

    fn html(&self, id: &str) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn show_panel(&self) {
        let (Some(instructions), Some(details)) = (self.html(INSTRUCTIONS_ID), self.html(DETAILS_ID))
        else {
            return;
        };
        let _ = instructions.style().set_property("display", "none");
        let _ = details.style().set_property("display", "flex");
    }

    fn mount_list<F, N>(&mut self, id: &str, view: F)
    where
        F: FnOnce() -> N + 'static,
        N: IntoView + 'static,
    {
        let Some(container) = self.html(id) else {
            return;
        };
        container.set_inner_html("");
        self.lists.push(Box::new(mount_to(container, view)));
    }

    /// Fade and slide each block in, one step apart.
    fn stagger(&mut self) {
        let mut targets: Vec<HtmlElement> = [
            NAME_ID,
            ENGLISH_ID,
            REGION_ID,
            IMAGE_CONTAINER_ID,
            DESCRIPTION_ID,
        ]
        .into_iter()
        .filter_map(|id| self.html(id))
        .collect();
        if let Ok(nodes) = self.document.query_selector_all(TAB_CONTENT_SELECTOR) {
            targets.extend(
                (0..nodes.length())
                    .filter_map(|i| nodes.item(i))
                    .filter_map(|node| node.dyn_into::<HtmlElement>().ok()),
            );
        }

        self.fades.clear();
        let delays = stagger_delays(targets.len());
        for (el, delay) in targets.into_iter().zip(delays) {
            let style = el.style();
            let _ = style.set_property("transition", "none");
            let _ = style.set_property("opacity", "0");
            let _ = style.set_property("transform", "translateY(10px)");
            self.fades.push(Timeout::new(delay, move || {
                let style = el.style();
                let _ = style.set_property("transition", "opacity 0.3s ease, transform 0.3s ease");
                let _ = style.set_property("opacity", "1");
                let _ = style.set_property("transform", "translateY(0)");
            }));
        }
    }
}

impl DetailSink for DomPanel {
    fn render(&mut self, content: &PanelContent) {
        if self.reveal.reveal() {
            self.show_panel();
        }

        self.set_text(NAME_ID, &content.name);
        self.set_text(ENGLISH_ID, &content.english);
        self.set_text(REGION_ID, &content.region_label);
        self.set_text(DESCRIPTION_ID, &content.description);
        self.set_text(POPULATION_ID, &content.population);
        self.set_text(AREA_ID, &content.area);
        self.set_text(SLOGAN_ID, &content.slogan);
        self.set_text(DIALECT_ID, &content.dialect);
        self.set_text(FUN_FACT_ID, &content.fun_fact);
        if let Some(img) = self
            .document
            .get_element_by_id(IMAGE_ID)
            .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
        {
            img.set_src(&content.image);
            img.set_alt(&content.name);
        }

        self.lists.clear();
        let attractions = content.attractions.clone();
        self.mount_list(ATTRACTIONS_ID, move || view! { <CardList cards=attractions /> });
        let food = content.food.clone();
        self.mount_list(FOOD_ID, move || view! { <CardList cards=food /> });
        let phrases = content.phrases.clone();
        self.mount_list(PHRASES_ID, move || view! { <PhraseList phrases=phrases /> });

        self.stagger();
    }
}
