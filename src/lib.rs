pub mod data {
    pub mod clients {
        pub mod sandbox_billing_client;
    }
    pub(crate) mod models {
        pub(crate) mod google_play_billing {
            pub(crate) mod purchase_data_model;
        }
    }
}

pub mod domain {
    pub mod entities {
        pub mod activity_result;
        pub mod billing_event;
        pub mod billing_result;
        pub mod iap_inventory;
        pub mod iap_product_id;
        pub mod iap_purchase;
        pub mod purchase_request;
        pub mod user_message;
    }
    pub mod repositories {
        pub mod billing_client;
        pub mod screen_host;
    }
}

pub mod config;
pub mod coordinator;
pub mod errors;
pub mod session;
