use std::sync::Arc;

use crate::itinerary::Itinerary;
use crate::photo_library::PhotoLibrary;
use crate::session::ViewerSession;
use crate::settings::Settings;

// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub itinerary: Arc<Itinerary>,
    pub session: ViewerSession,
    pub settings: Arc<Settings>,
    pub library: Option<Arc<PhotoLibrary>>,
}
