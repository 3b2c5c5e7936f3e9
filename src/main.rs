//! Bead rope calculator entry point
//!
//! Handles platform-specific initialization and wires the form to the engine.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlInputElement};

    use bead_rope_calc::calc::{InputField, derive, display_round, format_number};
    use bead_rope_calc::store::AppState;

    /// DOM ids of the four editable fields
    const INPUT_FIELDS: [(&str, InputField); 4] = [
        ("input-a", InputField::Length),
        ("input-b", InputField::RowsPer5Cm),
        ("input-c", InputField::RowsPerRepeat),
        ("input-d", InputField::BeadsPerRow),
    ];

    /// App instance holding all state
    struct App {
        state: AppState,
    }

    impl App {
        fn new() -> Self {
            Self {
                state: AppState::load(),
            }
        }

        /// Recompute E..L and push them into the read-only fields
        fn update_outputs(&self, document: &Document) {
            let d = derive(&self.state.inputs.values());
            set_field(document, "out-e", d.rows_per_cm);
            set_field(document, "out-f", d.total_rows);
            set_field(document, "out-g", d.rows_per_cm_check);
            set_field(document, "out-h", d.rows_to_add_each_side);
            set_field(document, "out-i", d.beads_to_add_each_side);
            set_field(document, "out-j", d.total_beads);
            set_field(document, "out-k", d.weight_preciosa_g);
            set_field(document, "out-l", d.weight_delica_g);
        }

        /// Save combined state to LocalStorage
        fn persist(&self) {
            self.state.save();
        }
    }

    /// Write a derived value into a read-only field (rounded for display)
    fn set_field(document: &Document, id: &str, value: f64) {
        if let Some(el) = document.get_element_by_id(id) {
            if let Ok(input) = el.dyn_into::<HtmlInputElement>() {
                input.set_value(&display_round(value).to_string());
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bead rope calculator starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let app = Rc::new(RefCell::new(App::new()));

        // Restore the editable fields from persisted state
        for (id, field) in INPUT_FIELDS {
            if let Some(el) = document.get_element_by_id(id) {
                if let Ok(input) = el.dyn_into::<HtmlInputElement>() {
                    input.set_value(app.borrow().state.inputs.get(field));
                }
            }
        }

        setup_input_fields(&document, app.clone());
        setup_reset_button(&document, app.clone());
        render_cheatsheet(&document, &app);
        app.borrow().update_outputs(&document);

        log::info!("Bead rope calculator ready");
    }

    /// One recompute-then-persist cycle per keystroke on A..D
    fn setup_input_fields(document: &Document, app: Rc<RefCell<App>>) {
        for (id, field) in INPUT_FIELDS {
            let Some(el) = document.get_element_by_id(id) else {
                log::warn!("Missing input element #{}", id);
                continue;
            };
            let Ok(input) = el.dyn_into::<HtmlInputElement>() else {
                continue;
            };

            let app = app.clone();
            let input_clone = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let document = web_sys::window().unwrap().document().unwrap();
                let mut a = app.borrow_mut();
                a.state.set_input(field, &input_clone.value());
                a.update_outputs(&document);
                a.persist();
            });
            let _ =
                input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_reset_button(document: &Document, app: Rc<RefCell<App>>) {
        if let Some(btn) = document.get_element_by_id("reset-cheatsheet") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                {
                    let mut a = app.borrow_mut();
                    a.state.reset_cheatsheet();
                    a.persist();
                }
                let document = web_sys::window().unwrap().document().unwrap();
                render_cheatsheet(&document, &app);
                log::info!("Cheatsheet reset to defaults");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Rebuild the cheatsheet table body from state
    fn render_cheatsheet(document: &Document, app: &Rc<RefCell<App>>) {
        let Some(body) = document.get_element_by_id("cheatsheet-body") else {
            log::warn!("Missing #cheatsheet-body");
            return;
        };
        body.set_inner_html("");

        let rows = app.borrow().state.cheatsheet.len();
        for index in 0..rows {
            match build_row(document, app, index) {
                Ok(tr) => {
                    let _ = body.append_child(&tr);
                }
                Err(e) => log::warn!("Failed to build cheatsheet row {}: {:?}", index, e),
            }
        }
    }

    /// One cheatsheet row: brand cell, two numeric cells, apply-to-B button.
    /// Edits commit on `change` (blur/Enter); malformed numeric input snaps
    /// back to the stored value.
    fn build_row(
        document: &Document,
        app: &Rc<RefCell<App>>,
        index: usize,
    ) -> Result<Element, JsValue> {
        let entry = app.borrow().state.cheatsheet[index].clone();
        let tr = document.create_element("tr")?;

        // Brand cell
        {
            let td = document.create_element("td")?;
            let input: HtmlInputElement = document.create_element("input")?.dyn_into()?;
            input.set_value(&entry.brand);

            let app = app.clone();
            let input_clone = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut a = app.borrow_mut();
                a.state.set_brand(index, &input_clone.value());
                a.persist();
            });
            let _ =
                input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();

            td.append_child(&input)?;
            tr.append_child(&td)?;
        }

        // Half-column and full-column cells
        for half_column in [true, false] {
            let td = document.create_element("td")?;
            let input: HtmlInputElement = document.create_element("input")?.dyn_into()?;
            let value = if half_column {
                entry.pivstovchyk
            } else {
                entry.stovpchyk
            };
            input.set_value(&format_number(value));

            let app = app.clone();
            let input_clone = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut a = app.borrow_mut();
                let raw = input_clone.value();
                if half_column {
                    a.state.set_pivstovchyk(index, &raw);
                } else {
                    a.state.set_stovpchyk(index, &raw);
                }
                // Reflect the committed (possibly fallback) value back
                if let Some(entry) = a.state.cheatsheet.get(index) {
                    let committed = if half_column {
                        entry.pivstovchyk
                    } else {
                        entry.stovpchyk
                    };
                    input_clone.set_value(&format_number(committed));
                }
                a.persist();
            });
            let _ =
                input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();

            td.append_child(&input)?;
            tr.append_child(&td)?;
        }

        // Apply-to-B button cell
        {
            let td = document.create_element("td")?;
            let button = document.create_element("button")?;
            button.set_text_content(Some("Підставити (B)"));

            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let document = web_sys::window().unwrap().document().unwrap();
                let mut a = app.borrow_mut();
                a.state.apply_to_rows_input(index);
                if let Some(el) = document.get_element_by_id("input-b") {
                    if let Ok(field) = el.dyn_into::<HtmlInputElement>() {
                        field.set_value(a.state.inputs.get(InputField::RowsPer5Cm));
                    }
                }
                a.update_outputs(&document);
                a.persist();
            });
            let _ =
                button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();

            td.append_child(&button)?;
            tr.append_child(&td)?;
        }

        Ok(tr)
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bead rope calculator (native) starting...");
    log::info!("This is a browser app - run with `trunk serve` for the web version");

    println!("\nSample derivation (A=100 cm, B=20, C=10, D=6):");
    demo_derivation();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_derivation() {
    use bead_rope_calc::calc::{InputValues, derive, display_round};

    let d = derive(&InputValues {
        length_cm: 100.0,
        rows_per_5cm: 20.0,
        rows_per_repeat: 10.0,
        beads_per_row: 6.0,
    });
    println!("  E rows per cm:              {}", display_round(d.rows_per_cm));
    println!("  F total rows:               {}", display_round(d.total_rows));
    println!("  G rows per cm (check):      {}", display_round(d.rows_per_cm_check));
    println!("  H rows to add each side:    {}", display_round(d.rows_to_add_each_side));
    println!("  I beads to add each side:   {}", display_round(d.beads_to_add_each_side));
    println!("  J total beads:              {}", display_round(d.total_beads));
    println!("  K weight, Preciosa 10/0 g:  {}", display_round(d.weight_preciosa_g));
    println!("  L weight, Delica 11/0 g:    {}", display_round(d.weight_delica_g));
}
