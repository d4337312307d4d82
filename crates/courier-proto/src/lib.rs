//! Generated protobuf and gRPC bindings for `courier.v1`.

tonic_prost::include_proto!("courier.v1");
