pub mod shared {
    pub mod core {
        pub mod retry;
    }
    pub mod infrastructure {
        pub mod event_bus;
    }
}

pub mod modules {
    pub mod catalog {
        pub mod core {
            pub mod city;
            pub mod events;
            pub mod movie;
            pub mod ports;
            pub mod screening;
            pub mod venue;
        }
        pub mod use_cases {
            pub mod find_screenings {
                pub mod handler;
                pub mod query;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod create_screening {
                pub mod command;
                pub mod handler;
                pub mod outcome;
                pub mod validate;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod browse_catalog {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod in_memory;
                pub mod postgres;
                pub mod screening_notifier;
            }
        }
    }
}

pub mod shell;
