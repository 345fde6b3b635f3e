use folio_core_contact_impl::ContactServiceImpl;
use folio_core_health_impl::HealthServiceImpl;
use folio_email_impl::EmailServiceImpl;

// API
pub type RestServer = folio_api_rest::RestServer<HealthFeature, ContactFeature>;

// Email
pub type Email = EmailServiceImpl;

// Core
pub type ContactFeature = ContactServiceImpl<Email>;
pub type HealthFeature = HealthServiceImpl<Email>;
