use proptest::prelude::*;
use w3d::chunks::hierarchy::Pivot;
use w3d::chunks::mesh::{TextureInfo, Triangle};
use w3d::chunks::primitives::{Quaternion, Vector3};
use w3d::chunks::{Name, Record};
use w3d::codec::Decoded;
use w3d::cursor::{Cursor, Writer};
use w3d::{registry, ChunkId, Codec};

fn encode<T: Record>(value: &T) -> Vec<u8> {
    let mut w = Writer::new();
    value.write(&mut w);
    w.into_bytes()
}

fn decode<T: Record>(bytes: &[u8]) -> T {
    T::read(&mut Cursor::new(bytes)).unwrap()
}

fn finite() -> impl Strategy<Value = f32> {
    -1.0e6f32..1.0e6
}

fn vector3() -> impl Strategy<Value = Vector3> {
    (finite(), finite(), finite()).prop_map(|(x, y, z)| Vector3::new(x, y, z))
}

/// Every struct and array codec in the built-in table, with its record size.
fn fixed_codecs() -> Vec<(ChunkId, Codec, usize)> {
    registry()
        .entries()
        .into_iter()
        .filter_map(|def| match def.codec {
            Codec::Struct(kind) => Some((def.id, def.codec, kind.size())),
            Codec::Array(kind) => Some((def.id, def.codec, kind.size())),
            Codec::Container | Codec::Text => None,
        })
        .collect()
}

#[test]
fn record_sizes_match_encodings() {
    assert_eq!(encode(&TextureInfo::default()).len(), TextureInfo::SIZE);
    assert_eq!(encode(&Triangle::default()).len(), Triangle::SIZE);
    assert_eq!(encode(&Pivot::default()).len(), Pivot::SIZE);
    assert_eq!(Pivot::SIZE, 60);
}

#[test]
fn fixed_name_is_nul_padded() {
    let name = Name::new("TURRET");
    let bytes = encode(&name);
    assert_eq!(bytes.len(), 16);
    assert_eq!(&bytes[..7], b"TURRET\0");
    assert_eq!(decode::<Name>(&bytes).as_str(), "TURRET");

    // Over-long names are cut so a terminator always fits.
    let long = Name::new("ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    assert_eq!(long.as_str(), "ABCDEFGHIJKLMNO");
}

#[test]
fn fixed_name_keeps_bytes_after_terminator() {
    let mut raw = [0u8; 16];
    raw[..3].copy_from_slice(b"BOX");
    raw[10] = 0xCC;
    let name: Name = decode(&raw);
    assert_eq!(name.as_str(), "BOX");
    assert_eq!(encode(&name), raw);
}

#[test]
fn default_quaternion_is_identity() {
    let q = Quaternion::default();
    assert_eq!((q.x, q.y, q.z, q.w), (0.0, 0.0, 0.0, 1.0));
}

proptest! {
    #[test]
    fn texture_info_roundtrip(
        attributes in any::<u16>(),
        anim_type in any::<u16>(),
        frame_count in any::<u32>(),
        frame_rate in finite(),
    ) {
        let info = TextureInfo { attributes, anim_type, frame_count, frame_rate };
        let bytes = encode(&info);
        prop_assert_eq!(bytes.len(), TextureInfo::SIZE);
        prop_assert_eq!(decode::<TextureInfo>(&bytes), info);
    }

    #[test]
    fn triangle_roundtrip(
        vindex in any::<[u32; 3]>(),
        attributes in any::<u32>(),
        normal in vector3(),
        dist in finite(),
    ) {
        let tri = Triangle { vindex, attributes, normal, dist };
        prop_assert_eq!(decode::<Triangle>(&encode(&tri)), tri);
    }

    #[test]
    fn pivot_roundtrip(
        name in "[A-Z_]{0,15}",
        parent_idx in any::<u32>(),
        translation in vector3(),
        euler_angles in vector3(),
        rotation in (finite(), finite(), finite(), finite()),
    ) {
        let pivot = Pivot {
            name: Name::new(&name),
            parent_idx,
            translation,
            euler_angles,
            rotation: Quaternion { x: rotation.0, y: rotation.1, z: rotation.2, w: rotation.3 },
        };
        let decoded = decode::<Pivot>(&encode(&pivot));
        prop_assert_eq!(decoded.name.as_str(), name.as_str());
        prop_assert_eq!(decoded, pivot);
    }

    /// Any well-sized body decodes without loss and re-encodes to the same
    /// bytes, for every fixed-layout codec in the table.
    #[test]
    fn registered_codecs_reencode_bodies_exactly(
        seed in proptest::collection::vec(any::<u8>(), 256),
        count in 0usize..4,
    ) {
        for (id, codec, size) in fixed_codecs() {
            let len = match codec {
                Codec::Struct(_) => size,
                _ => size * count,
            };
            let body = &seed[..len];
            let payload = match codec.decode(body).unwrap() {
                Decoded::Value { payload, consumed } => {
                    prop_assert_eq!(consumed, len, "{} consumed", id);
                    payload
                }
                other => return Err(TestCaseError::fail(format!("{id}: {other:?}"))),
            };
            let mut w = Writer::new();
            codec.encode(id, &payload, &mut w).unwrap();
            prop_assert_eq!(w.as_bytes(), body, "{} re-encoded", id);
        }
    }

    #[test]
    fn text_is_copied_verbatim(body in proptest::collection::vec(any::<u8>(), 0..64)) {
        let payload = match Codec::Text.decode(&body).unwrap() {
            Decoded::Value { payload, .. } => payload,
            other => return Err(TestCaseError::fail(format!("{other:?}"))),
        };
        let mut w = Writer::new();
        Codec::Text.encode(ChunkId::TEXTURE_NAME, &payload, &mut w).unwrap();
        prop_assert_eq!(w.into_bytes(), body);
    }
}
