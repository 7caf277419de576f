// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Generated OTLP protobuf and gRPC bindings. The `.rs` files included here are emitted by
//! `tonic_build`/`prost_build` from the `.proto` sources under `proto/`, per [`crate::generated`]'s
//! sibling `build.rs`.

#![allow(missing_docs, reason = "generated code")]
#![allow(clippy::all, reason = "generated code is not held to handwritten lint standards")]

pub mod opentelemetry {
    pub mod proto {
        pub mod common {
            pub mod v1 {
                include!(concat!(env!("OUT_DIR"), "/opentelemetry.proto.common.v1.rs"));
            }
        }
        pub mod resource {
            pub mod v1 {
                include!(concat!(env!("OUT_DIR"), "/opentelemetry.proto.resource.v1.rs"));
            }
        }
        pub mod logs {
            pub mod v1 {
                include!(concat!(env!("OUT_DIR"), "/opentelemetry.proto.logs.v1.rs"));
            }
        }
        pub mod collector {
            pub mod logs {
                pub mod v1 {
                    include!(concat!(env!("OUT_DIR"), "/opentelemetry.proto.collector.logs.v1.rs"));
                }
            }
        }
    }
}
