use eframe::egui;
use rand::rngs::StdRng;
use rand::SeedableRng;

use iris_folio::config::SiteConfig;
use iris_folio::gallery;
use iris_folio::session::Session;

mod app;
mod ui;

use app::content::CardView;
use app::PortfolioApp;

fn main() -> eframe::Result {
    env_logger::init();

    let config = SiteConfig::load();
    let entries = gallery::entries_or_fallback(&config.gallery);

    let mut rng = match config.seed {
        Some(seed) => {
            log::info!("shuffling with fixed seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let session = Session::start(config, entries, &mut rng, CardView::default());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 760.0])
            .with_min_inner_size([420.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "iris-folio",
        options,
        Box::new(move |_cc| Ok(Box::new(PortfolioApp::new(session)))),
    )
}
