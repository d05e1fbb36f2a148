pub mod shared {
    pub mod core {
        pub mod business_time;
        pub mod errors;
        pub mod review;
    }
    pub mod infrastructure {
        pub mod notification_outbox;
    }
}

pub mod modules {
    pub mod attendance {
        pub mod core {
            pub mod record;
            pub mod settings;
            pub mod status;
        }
        pub mod use_cases {
            pub mod resolve_settings {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod attendance_store {
                pub mod handler;
            }
            pub mod check_in {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod check_out {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod mark_absent {
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod list_attendance {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod attendance_repository;
                pub mod attendance_repository_in_memory;
                pub mod directory;
                pub mod directory_in_memory;
                pub mod settings_repository;
                pub mod settings_repository_in_memory;
            }
        }
    }

    pub mod regularization {
        pub mod core {
            pub mod request;
        }
        pub mod use_cases {
            pub mod submit_regularization {
                pub mod command;
                pub mod decide;
                pub mod decision;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod review_regularization {
                pub mod command;
                pub mod decide;
                pub mod decision;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod list_regularizations {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod regularization_repository;
                pub mod regularization_repository_in_memory;
            }
        }
    }

    pub mod wfh {
        pub mod core {
            pub mod geo;
            pub mod request;
        }
        pub mod use_cases {
            pub mod submit_wfh {
                pub mod command;
                pub mod decide;
                pub mod decision;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod review_wfh {
                pub mod command;
                pub mod decide;
                pub mod decision;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod list_wfh {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod office_locator;
                pub mod office_locator_static;
                pub mod wfh_repository;
                pub mod wfh_repository_in_memory;
            }
        }
    }
}

pub mod shell;
