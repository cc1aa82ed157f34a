use std::{future::Future, pin::Pin, sync::Arc};

use crate::events::{EventHandler, EventProducer, Handler, OrderSubmittedEvent, OrderVerdictEvent};

#[derive(Default, Clone)]
pub struct EventProducers {
    pub order_submitted_producer: Vec<EventProducer<OrderSubmittedEvent>>,
    pub order_verdict_producer: Vec<EventProducer<OrderVerdictEvent>>,
}

impl EventProducers {
    pub async fn publish_order_submitted(&self, event: OrderSubmittedEvent) {
        for emitter in &self.order_submitted_producer {
            emitter.publish_event(event.clone()).await;
        }
    }

    pub async fn publish_order_verdict(&self, event: OrderVerdictEvent) {
        for emitter in &self.order_verdict_producer {
            emitter.publish_event(event.clone()).await;
        }
    }
}

pub struct EventHandlers {
    pub on_order_submitted: Option<EventHandler<OrderSubmittedEvent>>,
    pub on_order_verdict: Option<EventHandler<OrderVerdictEvent>>,
}

impl EventHandlers {
    pub fn new(buffer_size: usize, hooks: EventHooks) -> Self {
        let on_order_submitted = hooks.on_order_submitted.map(|f| EventHandler::new(buffer_size, f));
        let on_order_verdict = hooks.on_order_verdict.map(|f| EventHandler::new(buffer_size, f));
        Self { on_order_submitted, on_order_verdict }
    }

    pub fn producers(&self) -> EventProducers {
        let mut result = EventProducers::default();
        if let Some(handler) = &self.on_order_submitted {
            result.order_submitted_producer.push(handler.subscribe());
        }
        if let Some(handler) = &self.on_order_verdict {
            result.order_verdict_producer.push(handler.subscribe());
        }
        result
    }

    pub async fn start_handlers(self) {
        if let Some(handler) = self.on_order_submitted {
            tokio::spawn(async move {
                handler.start_handler().await;
            });
        }
        if let Some(handler) = self.on_order_verdict {
            tokio::spawn(async move {
                handler.start_handler().await;
            });
        }
    }
}

#[derive(Default, Clone)]
pub struct EventHooks {
    pub on_order_submitted: Option<Handler<OrderSubmittedEvent>>,
    pub on_order_verdict: Option<Handler<OrderVerdictEvent>>,
}

impl EventHooks {
    pub fn on_order_submitted<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(OrderSubmittedEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_order_submitted = Some(Arc::new(f));
        self
    }

    pub fn on_order_verdict<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(OrderVerdictEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_order_verdict = Some(Arc::new(f));
        self
    }
}
