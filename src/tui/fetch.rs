//! Background fetch worker
//!
//! The blocking HTTP client lives on its own thread so the UI never waits on
//! the network. Requests go in over one channel; replies come back as
//! [`Event::Fetched`] on the main event channel, so every state change still
//! happens on the loop thread. Requests are served one at a time, in order.

use std::sync::mpsc;
use std::thread;

use zeroize::Zeroizing;

use super::event::Event;
use crate::api::{BudgetClient, Transport};
use crate::error::DashResult;
use crate::models::{
    LoginResponse, MonthlyReview, ReclassifiedTransaction, ReviewPeriod, SavingsGoal, Tenant,
    TenantId, TransactionId, TransactionPage,
};
use crate::services::health::{self, HealthStatus};
use crate::services::{PageRequest, ReclassifyRequest, Ticket};

/// Work for the fetch thread
pub enum FetchRequest {
    Health,
    Tenants,
    Review {
        tenant: TenantId,
        period: ReviewPeriod,
    },
    Goals {
        tenant: TenantId,
    },
    Transactions {
        tenant: TenantId,
        page: PageRequest,
    },
    Reclassify {
        tenant: TenantId,
        request: ReclassifyRequest,
    },
    Login {
        email: String,
        password: Zeroizing<String>,
        tenant: TenantId,
    },
    /// Swap the bearer token used for later requests
    SetToken(Option<Zeroizing<String>>),
    Shutdown,
}

impl FetchRequest {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Tenants => "tenants",
            Self::Review { .. } => "review",
            Self::Goals { .. } => "goals",
            Self::Transactions { .. } => "transactions",
            Self::Reclassify { .. } => "reclassify",
            Self::Login { .. } => "login",
            Self::SetToken(_) => "set-token",
            Self::Shutdown => "shutdown",
        }
    }
}

/// Results posted back to the loop. Each carries enough of its request to be
/// matched against current state.
#[derive(Debug)]
pub enum FetchReply {
    Health(HealthStatus),
    Tenants(DashResult<Vec<Tenant>>),
    Review {
        tenant: TenantId,
        period: ReviewPeriod,
        result: DashResult<MonthlyReview>,
    },
    Goals {
        tenant: TenantId,
        result: DashResult<Vec<SavingsGoal>>,
    },
    Transactions {
        tenant: TenantId,
        ticket: Ticket,
        result: DashResult<TransactionPage>,
    },
    Reclassified {
        tenant: TenantId,
        id: TransactionId,
        seq: u64,
        result: DashResult<ReclassifiedTransaction>,
    },
    LoggedIn {
        tenant: TenantId,
        result: DashResult<LoginResponse>,
    },
}

/// Run one request against the client. Token changes produce no reply.
pub fn serve<T: Transport>(client: &mut BudgetClient<T>, request: FetchRequest) -> Option<FetchReply> {
    log::debug!("Fetching {}", request.name());
    let reply = match request {
        FetchRequest::Health => FetchReply::Health(health::check(client)),
        FetchRequest::Tenants => FetchReply::Tenants(client.tenants()),
        FetchRequest::Review { tenant, period } => {
            let result = client.monthly_review(&tenant, period);
            FetchReply::Review {
                tenant,
                period,
                result,
            }
        }
        FetchRequest::Goals { tenant } => {
            let result = client.savings_goals(&tenant);
            FetchReply::Goals { tenant, result }
        }
        FetchRequest::Transactions { tenant, page } => {
            let result = client.transactions_page(&tenant, &page.filters, page.cursor.as_deref());
            FetchReply::Transactions {
                tenant,
                ticket: page.ticket,
                result,
            }
        }
        FetchRequest::Reclassify { tenant, request } => {
            let result = client.reclassify(&tenant, &request.id, &request.category);
            FetchReply::Reclassified {
                tenant,
                id: request.id,
                seq: request.seq,
                result,
            }
        }
        FetchRequest::Login {
            email,
            password,
            tenant,
        } => {
            let result = client.login(&email, &password, &tenant);
            FetchReply::LoggedIn { tenant, result }
        }
        FetchRequest::SetToken(token) => {
            client.set_token(token.as_ref().map(|t| t.as_str()));
            return None;
        }
        FetchRequest::Shutdown => return None,
    };
    Some(reply)
}

/// Handle to the fetch thread
pub struct FetchWorker {
    sender: mpsc::Sender<FetchRequest>,
    handle: Option<thread::JoinHandle<()>>,
}

impl FetchWorker {
    /// Move `client` onto a new thread that posts replies to `events`
    pub fn spawn<T>(mut client: BudgetClient<T>, events: mpsc::Sender<Event>) -> Self
    where
        T: Transport + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel::<FetchRequest>();
        let handle = thread::spawn(move || {
            while let Ok(request) = receiver.recv() {
                if matches!(request, FetchRequest::Shutdown) {
                    break;
                }
                if let Some(reply) = serve(&mut client, request) {
                    if events.send(Event::Fetched(reply)).is_err() {
                        break;
                    }
                }
            }
            log::debug!("Fetch worker stopped");
        });

        Self {
            sender,
            handle: Some(handle),
        }
    }

    /// Queue a request. Returns false once the worker has gone away.
    pub fn send(&self, request: FetchRequest) -> bool {
        self.sender.send(request).is_ok()
    }
}

impl Drop for FetchWorker {
    fn drop(&mut self) {
        let _ = self.sender.send(FetchRequest::Shutdown);
        // an in-flight request finishes within the client timeout; don't wait on it
        drop(self.handle.take());
    }
}
