// Build script for auth-gateway
// Compiles auth_gateway.proto for gRPC server and client code generation
fn main() {
    println!("cargo:rerun-if-changed=../proto/auth_gateway.proto");

    // auth-gateway PROVIDES Auth (server implementation)
    // Client code is also generated for integration tests
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["../proto/auth_gateway.proto"], &["../proto"])
        .expect("Failed to compile auth_gateway.proto for auth-gateway");
}
