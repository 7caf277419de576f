// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

fn main() {
    let proto_root = "proto";
    let protos = [
        "proto/opentelemetry/proto/collector/logs/v1/logs_service.proto",
        "proto/opentelemetry/proto/logs/v1/logs.proto",
        "proto/opentelemetry/proto/resource/v1/resource.proto",
        "proto/opentelemetry/proto/common/v1/common.proto",
    ];

    for proto in protos {
        println!("cargo:rerun-if-changed={proto}");
    }

    tonic_build::configure()
        .build_client(true)
        .build_server(true)
        .compile_protos(&protos, &[proto_root])
        .expect("failed to compile OTLP protobuf definitions");
}
