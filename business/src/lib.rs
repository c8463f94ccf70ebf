pub mod application {
    pub mod sweet {
        pub mod create;
        pub mod delete;
        pub mod get_all;
        pub mod get_by_id;
        pub mod get_paginated;
        pub mod purchase;
        pub mod restock;
        pub mod search;
        pub mod update;
    }
    pub mod cart {
        pub mod add_item;
        pub mod checkout;
        pub mod clear;
        pub mod get;
        pub mod get_orders;
        pub mod remove_item;
        pub mod summary;
        pub mod update_item;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod shared {
        pub mod entity_id;
        pub mod value_objects;
    }
    pub mod sweet {
        pub mod errors;
        pub mod model;
        pub mod repository;
        pub mod value_objects;
        pub mod use_cases {
            pub mod create;
            pub mod delete;
            pub mod get_all;
            pub mod get_by_id;
            pub mod get_paginated;
            pub mod purchase;
            pub mod restock;
            pub mod search;
            pub mod update;
        }
    }
    pub mod cart {
        pub mod errors;
        pub mod model;
        pub mod order;
        pub mod repository;
        pub mod value_objects;
        pub mod use_cases {
            pub mod add_item;
            pub mod checkout;
            pub mod clear;
            pub mod get;
            pub mod get_orders;
            pub mod remove_item;
            pub mod summary;
            pub mod update_item;
        }
    }
}

#[cfg(test)]
mod test_support;
