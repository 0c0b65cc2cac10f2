//! Projects sequencer state onto the hero markup
//!
//! Expected markup: `#hero` holding `#hero-title`, `#hero-pile`,
//! `#hero-addon`, `#hero-subtitle` and `#hero-cta`. Card nodes are created
//! inside `#hero-pile`.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::sequencer::{PlacedCard, Reveal, Sequencer};

const SHOWN_CLASS: &str = "is-shown";
const CARD_CLASS: &str = "hero-card";

pub struct HeroDom {
    document: Document,
    root: Element,
    pile: Option<Element>,
    title: Option<Element>,
    addon: Option<Element>,
    subtitle: Option<Element>,
    cta: Option<Element>,
    cards: Vec<HtmlElement>,
}

impl HeroDom {
    /// Look up the hero markup. None if the page has no hero.
    pub fn find(root_id: &str) -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let root = document.get_element_by_id(root_id)?;
        let by_id = |id: &str| document.get_element_by_id(id);
        Some(Self {
            pile: by_id("hero-pile"),
            title: by_id("hero-title"),
            addon: by_id("hero-addon"),
            subtitle: by_id("hero-subtitle"),
            cta: by_id("hero-cta"),
            document,
            root,
            cards: Vec::new(),
        })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Create one node per card, in reveal order
    pub fn build_cards(&mut self, placed: &[PlacedCard]) {
        let Some(pile) = &self.pile else {
            log::warn!("No #hero-pile element; cards will not render");
            return;
        };
        pile.set_inner_html("");
        self.cards.clear();

        for card in placed {
            match self.create_card(card) {
                Some(el) => {
                    let _ = pile.append_child(&el);
                    self.cards.push(el);
                }
                None => log::warn!("Failed to create card node for {}", card.spec.title),
            }
        }
    }

    fn create_card(&self, card: &PlacedCard) -> Option<HtmlElement> {
        let el: HtmlElement = self.document.create_element("div").ok()?.dyn_into().ok()?;
        el.set_class_name(CARD_CLASS);

        let img = self.document.create_element("img").ok()?;
        let _ = img.set_attribute("src", &card.spec.image_ref);
        let _ = img.set_attribute("alt", &card.spec.title);
        let _ = el.append_child(&img);

        let caption = self.document.create_element("span").ok()?;
        caption.set_text_content(Some(&card.spec.title));
        let _ = el.append_child(&caption);

        Some(el)
    }

    /// Write phase, element visibility and card placement
    pub fn render(&self, seq: &Sequencer) {
        let _ = self.root.set_attribute("data-phase", seq.phase().as_str());

        let Reveal {
            title,
            pile,
            addon,
            subtitle,
            cta,
        } = seq.reveal();
        set_shown(self.title.as_ref(), title);
        set_shown(self.pile.as_ref(), pile);
        set_shown(self.addon.as_ref(), addon);
        set_shown(self.subtitle.as_ref(), subtitle);
        set_shown(self.cta.as_ref(), cta);

        let visible = seq.pile_index();
        for (el, card) in self.cards.iter().zip(seq.placed_cards()) {
            let style = el.style();
            let _ = style.set_property("transform", &card_transform(card));
            let _ = style.set_property("z-index", &card.z_index.to_string());
            let _ = el.class_list().toggle_with_force(SHOWN_CLASS, card.id < visible);
        }
    }
}

fn set_shown(el: Option<&Element>, shown: bool) {
    if let Some(el) = el {
        let _ = el.class_list().toggle_with_force(SHOWN_CLASS, shown);
    }
}

/// Cards are positioned by their center
fn card_transform(card: &PlacedCard) -> String {
    format!(
        "translate({:.1}px, {:.1}px) translate(-50%, -50%) rotate({}deg) scale({})",
        card.pos.x, card.pos.y, card.slot.rotation_degrees, card.scale
    )
}
