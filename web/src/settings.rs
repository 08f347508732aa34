use crate::utils::*;
use pairup_core::{GameConfig, PairCount, SymbolPick};
use serde::{Deserialize, Serialize};
use yew::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct Settings {
    pub pair_count: PairCount,
    pub symbol_pick: SymbolPick,
}

impl Settings {
    pub(crate) fn game_config(&self) -> GameConfig {
        GameConfig::new(self.pair_count).with_symbol_pick(self.symbol_pick)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pair_count: PairCount::default(),
            symbol_pick: SymbolPick::default(),
        }
    }
}

impl StorageKey for Settings {
    const KEY: &'static str = "pairup:settings";
}

#[derive(Properties, PartialEq)]
pub(crate) struct SizeMenuProps {
    #[prop_or_default]
    pub open: bool,
    pub selected: Settings,
    pub onselect: Callback<PairCount>,
    pub ontogglepick: Callback<()>,
}

/// Drop-down offering the supported deck sizes.
#[function_component]
pub(crate) fn SizeMenu(props: &SizeMenuProps) -> Html {
    let ontogglepick = {
        let callback = props.ontogglepick.clone();
        Callback::from(move |_: MouseEvent| callback.emit(()))
    };
    let pick_label = match props.selected.symbol_pick {
        SymbolPick::Leading => "Classic symbols",
        SymbolPick::Random => "Random symbols",
    };

    html! {
        <dialog class="sizes" open={props.open}>
            <menu>
                {
                    for PairCount::ALL.into_iter().map(|pair_count| {
                        let onclick = {
                            let callback = props.onselect.clone();
                            Callback::from(move |_: MouseEvent| callback.emit(pair_count))
                        };
                        let class = classes!((props.selected.pair_count == pair_count).then_some("selected"));
                        html! {
                            <li><button {class} {onclick}>{format!("{} Pairs", pair_count)}</button></li>
                        }
                    })
                }
            </menu>
            <footer>
                <button onclick={ontogglepick}>{pick_label}</button>
            </footer>
        </dialog>
    }
}
