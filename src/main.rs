use clap::Parser;

use credgate::{config, launch, ui};

// Executed when the program is run, with window errors propagated through
// the function using the ? operator
fn main() -> Result<(), eframe::Error> {
    let args = config::Args::parse();
    config::init_logging(&args);
    let ctx = config::AppContext::from_args(&args);
    tracing::info!("credential gate starting");

    // Create & display the gate window
    let authenticated = match ui::gate::run(&ctx) {
        Ok(v) => v,
        // The window is already torn down here; report and exit
        Err(e) => {
            tracing::error!(error = %e, "gate session failed");
            return Err(e);
        }
    };

    // Only an authenticated session hands control onwards
    // Otherwise the user closed the window, so there is nothing to launch
    if authenticated {
        if let Err(e) = launch::downstream(&ctx) {
            tracing::error!(error = %e, "downstream application failed");
        }
    } else {
        tracing::info!("session ended without authentication");
    }

    tracing::info!("credential gate exited");
    Ok(())
}
