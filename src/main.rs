#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("cv-effects runs in the browser. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    cv_effects::frontend::run();
}
