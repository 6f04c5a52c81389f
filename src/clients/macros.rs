/// Generate a client method that sends a lifecycle action to the order actor
/// and returns the updated order, with automatic tracing.
macro_rules! order_action {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) as $action:ident::$variant:ident) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, id: String, $($param: $param_type),*) -> Result<Order, OrderError> {
                tracing::debug!("Sending request");
                self.inner.perform_action(id, $action::$variant { $($param),* }).await
            }
        }
    };
}
