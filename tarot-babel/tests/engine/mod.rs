mod properties;
mod roundtrip;
