//! rTodo main entrypoint.

use rtodo::run;
use rtodo::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
