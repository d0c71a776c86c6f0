// @generated
// Wires up the buf-generated protobuf code checked in under src/gen.
// The prost files include!() their tonic counterparts.

pub mod todo {
    include!("gen/todo.v1.rs");
    // todo.v1.tonic.rs is auto-included by todo.v1.rs
}
