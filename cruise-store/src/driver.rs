use cruise_core::{CruiseSource, ListingCommand, ListingController, ListingMessage};
use std::sync::Arc;

/// Runs the commands a [`ListingController`] emits against a data source and
/// feeds each completion back in.
#[derive(Clone)]
pub struct ListingDriver {
    source: Arc<dyn CruiseSource>,
}

impl ListingDriver {
    pub fn new(source: Arc<dyn CruiseSource>) -> Self {
        Self { source }
    }

    /// Applies `message` and awaits any fetch it triggers.
    pub async fn dispatch(&self, controller: &mut ListingController, message: ListingMessage) {
        let mut command = controller.update(message);

        while let ListingCommand::Fetch(request) = command {
            let result = self.source.fetch_cruises(&request.endpoint).await;
            command = controller.update(ListingMessage::FetchCompleted {
                ticket: request.ticket,
                result,
            });
        }
    }
}
