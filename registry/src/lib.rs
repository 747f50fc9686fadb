use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::notifier::WebhookNotifier;
use adapter::repository::account::AccountProviderImpl;
use adapter::repository::booking::BookingRepositoryImpl;
use adapter::repository::health::HealthCheckRepositoryImpl;
use adapter::repository::space::SpaceRepositoryImpl;
use kernel::repository::{
    account::AccountProvider, booking::BookingRepository, health::HealthCheckRepository,
    notifier::NotificationSink, space::SpaceRepository,
};
use kernel::service::{booking::BookingService, search::SearchService, space::SpaceService};
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    space_service: Arc<SpaceService>,
    booking_service: Arc<BookingService>,
    search_service: Arc<SearchService>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, app_config: AppConfig) -> Self {
        let space_repository: Arc<dyn SpaceRepository> =
            Arc::new(SpaceRepositoryImpl::new(pool.clone()));
        let booking_repository: Arc<dyn BookingRepository> =
            Arc::new(BookingRepositoryImpl::new(pool.clone()));
        let account_provider: Arc<dyn AccountProvider> =
            Arc::new(AccountProviderImpl::new(pool.clone()));
        let notifier: Arc<dyn NotificationSink> =
            Arc::new(WebhookNotifier::new(&app_config.notifier));
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool));

        Self {
            health_check_repository,
            space_service: Arc::new(SpaceService::new(
                space_repository.clone(),
                booking_repository.clone(),
            )),
            booking_service: Arc::new(BookingService::new(
                space_repository.clone(),
                booking_repository,
                account_provider,
                notifier,
            )),
            search_service: Arc::new(SearchService::new(space_repository)),
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn space_service(&self) -> Arc<SpaceService> {
        self.space_service.clone()
    }

    pub fn booking_service(&self) -> Arc<BookingService> {
        self.booking_service.clone()
    }

    pub fn search_service(&self) -> Arc<SearchService> {
        self.search_service.clone()
    }
}
