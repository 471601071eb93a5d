use std::io::{Cursor, Write};

use s4pi_catalog::{
    ByteBool, CatalogError, ObjectDefinitionResource, PropertyId, PropertyValue, Resource, ResourceKey, TgiReference,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const KEY: ResourceKey = ResourceKey::new(ObjectDefinitionResource::RESOURCE_TYPE, 0, 0x0000000000ABCDEF);

#[test]
fn test_empty_object_definition() -> anyhow::Result<()> {
    init_logger();

    let objd = ObjectDefinitionResource::from_bytes(&KEY, &[])?;
    assert!(objd.is_empty());
    assert_eq!(objd.name(), None);
    assert_eq!(objd.tuning(), None);
    assert_eq!(objd.simoleon_price(), None);

    let bytes = objd.to_bytes()?;
    assert_eq!(bytes, vec![2, 0, 6, 0, 0, 0, 0, 0]);

    let decoded = ObjectDefinitionResource::from_bytes(&KEY, &bytes)?;
    assert_eq!(decoded, objd);
    assert_eq!(decoded.name(), None);
    Ok(())
}

#[test]
fn test_name_round_trip() -> anyhow::Result<()> {
    let mut objd = ObjectDefinitionResource::default();
    objd.add_property(PropertyId::Name);
    assert_eq!(objd.name(), Some(""));
    objd.set_name("TestObject");

    let decoded = ObjectDefinitionResource::from_bytes(&KEY, &objd.to_bytes()?)?;
    assert_eq!(decoded.name(), Some("TestObject"));
    assert!(decoded.has_property(PropertyId::Name));
    assert!(!decoded.has_property(PropertyId::Tuning));
    Ok(())
}

#[test]
fn test_swapped_instance_survives() -> anyhow::Result<()> {
    let icon = TgiReference::new(0x00B2D882, 0, 0xAABBCCDD11223344);
    let mut objd = ObjectDefinitionResource::default();
    objd.set_icon(vec![icon]);

    let bytes = objd.to_bytes()?;

    // Header, then the byte count, then the instance with its halves exchanged.
    assert_eq!(&bytes[6..10], &16u32.to_le_bytes());
    assert_eq!(&bytes[10..18], &0x11223344AABBCCDDu64.to_le_bytes());
    assert_eq!(&bytes[18..22], &0x00B2D882u32.to_le_bytes());

    let decoded = ObjectDefinitionResource::from_bytes(&KEY, &bytes)?;
    assert_eq!(decoded.icon(), Some(&[icon][..]));
    assert_eq!(decoded.icon().map(|refs| refs[0].instance), Some(0xAABBCCDD11223344));
    Ok(())
}

#[test]
fn test_reads_table_before_data() -> anyhow::Result<()> {
    let mut data = Vec::new();
    let mut cursor = Cursor::new(&mut data);

    cursor.write_all(&1u16.to_le_bytes())?; // version
    cursor.write_all(&6u32.to_le_bytes())?; // table right after the header
    cursor.write_all(&2u16.to_le_bytes())?;
    cursor.write_all(&0xE7F07786u32.to_le_bytes())?; // Name
    cursor.write_all(&24u32.to_le_bytes())?;
    cursor.write_all(&0xE4F4FAA4u32.to_le_bytes())?; // SimoleonPrice
    cursor.write_all(&32u32.to_le_bytes())?;
    cursor.write_all(&4u32.to_le_bytes())?;
    cursor.write_all(b"Test")?;
    cursor.write_all(&125u32.to_le_bytes())?;

    let objd = ObjectDefinitionResource::from_bytes(&KEY, &data)?;
    assert_eq!(objd.version, 1);
    assert_eq!(objd.name(), Some("Test"));
    assert_eq!(objd.simoleon_price(), Some(125));

    // Re-encoding moves the table to the end, after which the layout is stable.
    let encoded = objd.to_bytes()?;
    let again = ObjectDefinitionResource::from_bytes(&KEY, &encoded)?;
    assert_eq!(again, objd);
    assert_eq!(again.to_bytes()?, encoded);
    Ok(())
}

#[test]
fn test_unknown_property_is_kept_verbatim() -> anyhow::Result<()> {
    let mut data = Vec::new();
    data.extend_from_slice(&2u16.to_le_bytes());
    data.extend_from_slice(&18u32.to_le_bytes());
    data.extend_from_slice(&[1, 2, 3, 4, 5]); // unknown property at 6
    data.extend_from_slice(&3u32.to_le_bytes()); // Name at 11
    data.extend_from_slice(b"Abc");
    data.extend_from_slice(&2u16.to_le_bytes()); // table at 18
    data.extend_from_slice(&0x12345678u32.to_le_bytes());
    data.extend_from_slice(&6u32.to_le_bytes());
    data.extend_from_slice(&0xE7F07786u32.to_le_bytes());
    data.extend_from_slice(&11u32.to_le_bytes());

    let objd = ObjectDefinitionResource::from_bytes(&KEY, &data)?;
    assert_eq!(objd.property(PropertyId::Other(0x12345678)), Some(&PropertyValue::Raw(vec![1, 2, 3, 4, 5])));
    assert_eq!(objd.name(), Some("Abc"));

    let order: Vec<u32> = objd.properties().map(|(id, _)| id.id()).collect();
    assert_eq!(order, vec![0x12345678, 0xE7F07786]);

    assert_eq!(objd.to_bytes()?, data);
    Ok(())
}

#[test]
fn test_unknown_property_runs_to_table() -> anyhow::Result<()> {
    let mut objd = ObjectDefinitionResource::default();
    objd.set_simoleon_price(10);
    objd.set_raw_property(0x0BADF00D, vec![9, 9, 9])?;

    let decoded = ObjectDefinitionResource::from_bytes(&KEY, &objd.to_bytes()?)?;
    assert_eq!(decoded.property(PropertyId::from(0x0BADF00D)), Some(&PropertyValue::Raw(vec![9, 9, 9])));
    assert_eq!(decoded, objd);

    assert!(objd.set_raw_property(PropertyId::Tuning.id(), vec![1]).is_err());
    Ok(())
}

#[test]
fn test_empty_unknown_property_before_known_property() -> anyhow::Result<()> {
    let mut objd = ObjectDefinitionResource::default();
    objd.add_property(PropertyId::Other(0x12345678));
    objd.set_name("TestObject");

    // The empty value and the name share an offset.
    let first = objd.to_bytes()?;
    let decoded = ObjectDefinitionResource::from_bytes(&KEY, &first)?;
    assert_eq!(decoded.property(PropertyId::Other(0x12345678)), Some(&PropertyValue::Raw(Vec::new())));
    assert_eq!(decoded.name(), Some("TestObject"));
    assert_eq!(decoded, objd);
    assert_eq!(decoded.to_bytes()?, first);
    Ok(())
}

#[test]
fn test_empty_unknown_properties_at_every_position() -> anyhow::Result<()> {
    let mut objd = ObjectDefinitionResource::default();
    objd.set_raw_property(0x0000AAAA, Vec::new())?;
    objd.set_simoleon_price(7);
    objd.set_raw_property(0x0000BBBB, Vec::new())?;
    objd.set_raw_property(0x0000CCCC, vec![1, 2])?;
    objd.set_raw_property(0x0000DDDD, Vec::new())?;

    let first = objd.to_bytes()?;
    let decoded = ObjectDefinitionResource::from_bytes(&KEY, &first)?;
    assert_eq!(decoded, objd);
    assert_eq!(decoded.property(PropertyId::Other(0x0000CCCC)), Some(&PropertyValue::Raw(vec![1, 2])));
    assert_eq!(decoded.to_bytes()?, first);
    Ok(())
}

#[test]
fn test_unknown_property_at_end_of_buffer_is_empty() -> anyhow::Result<()> {
    let mut data = Vec::new();
    data.extend_from_slice(&2u16.to_le_bytes());
    data.extend_from_slice(&6u32.to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes());
    data.extend_from_slice(&0x12345678u32.to_le_bytes());
    data.extend_from_slice(&16u32.to_le_bytes()); // the buffer length

    let objd = ObjectDefinitionResource::from_bytes(&KEY, &data)?;
    assert_eq!(objd.property(PropertyId::Other(0x12345678)), Some(&PropertyValue::Raw(Vec::new())));
    Ok(())
}

#[test]
fn test_bool_property_keeps_its_byte() -> anyhow::Result<()> {
    let mut data = Vec::new();
    data.extend_from_slice(&2u16.to_le_bytes());
    data.extend_from_slice(&7u32.to_le_bytes());
    data.push(0x02); // IsBaby at 6
    data.extend_from_slice(&1u16.to_le_bytes()); // table at 7
    data.extend_from_slice(&0xAEE67A1Cu32.to_le_bytes());
    data.extend_from_slice(&6u32.to_le_bytes());

    let objd = ObjectDefinitionResource::from_bytes(&KEY, &data)?;
    assert_eq!(objd.is_baby(), Some(true));
    assert_eq!(objd.property(PropertyId::IsBaby), Some(&PropertyValue::Bool(ByteBool(0x02))));
    assert_eq!(objd.to_bytes()?, data);

    // Setting the flag normalizes it.
    let mut objd = objd;
    objd.set_is_baby(true);
    assert_eq!(objd.to_bytes()?[6], 0x01);
    Ok(())
}

#[test]
fn test_add_property_is_idempotent() {
    let mut objd = ObjectDefinitionResource::default();
    objd.set_name("Kept");
    objd.add_property(PropertyId::Name);
    objd.add_property(PropertyId::Other(PropertyId::Name.id()));

    assert_eq!(objd.len(), 1);
    assert_eq!(objd.name(), Some("Kept"));
}

#[test]
fn test_setters_and_removal_keep_order() -> anyhow::Result<()> {
    let mut objd = ObjectDefinitionResource::default();
    objd.set_name("Chair");
    objd.set_tuning("object_chair");
    objd.set_tuning_id(0x0000000000001234);
    objd.set_simoleon_price(200);
    objd.set_positive_environment_score(1.5);
    objd.set_is_baby(false);
    objd.set_components(vec![1, 2, 3]);
    objd.set_environment_score_emotion_tags(vec![0x10, 0x20]);
    objd.set_environment_scores(vec![0.5, -0.5]);
    objd.set_unknown4(vec![0xDE, 0xAD]);
    objd.set_footprint(vec![TgiReference::new(0xD382BF57, 0, 0xF00)]);

    // Replacing a value keeps its slot.
    objd.set_simoleon_price(250);
    assert_eq!(objd.properties().nth(3).map(|(id, _)| id), Some(PropertyId::SimoleonPrice));

    assert_eq!(objd.remove_property(PropertyId::Tuning), Some(PropertyValue::String("object_chair".to_owned())));
    assert_eq!(objd.remove_property(PropertyId::Tuning), None);

    let decoded = ObjectDefinitionResource::from_bytes(&KEY, &objd.to_bytes()?)?;
    assert_eq!(decoded, objd);
    assert_eq!(decoded.tuning(), None);
    assert_eq!(decoded.tuning_id(), Some(0x1234));
    assert_eq!(decoded.simoleon_price(), Some(250));
    assert_eq!(decoded.environment_scores(), Some(&[0.5f32, -0.5][..]));
    assert_eq!(decoded.unknown4(), Some(&[0xDE, 0xAD][..]));

    let order: Vec<PropertyId> = decoded.properties().map(|(id, _)| id).collect();
    assert_eq!(order[0], PropertyId::Name);
    assert_eq!(order[1], PropertyId::TuningId);
    assert_eq!(order[2], PropertyId::SimoleonPrice);
    Ok(())
}

#[test]
fn test_table_position_outside_buffer() {
    let data = [2u8, 0, 0xFF, 0, 0, 0, 0, 0];
    let err = ObjectDefinitionResource::from_bytes(&KEY, &data).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidMagicOrHeader { offset: 2, .. }));
}

#[test]
fn test_entry_offset_outside_buffer() {
    let mut data = Vec::new();
    data.extend_from_slice(&2u16.to_le_bytes());
    data.extend_from_slice(&6u32.to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes());
    data.extend_from_slice(&0xE7F07786u32.to_le_bytes());
    data.extend_from_slice(&500u32.to_le_bytes());

    let err = ObjectDefinitionResource::from_bytes(&KEY, &data).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidMagicOrHeader { offset: 8, .. }));
}

#[test]
fn test_truncated_header() {
    let err = ObjectDefinitionResource::from_bytes(&KEY, &[2, 0, 6]).unwrap_err();
    assert_eq!(err, CatalogError::UnexpectedEndOfData { offset: 3 });
}

#[test]
fn test_truncated_value() {
    let mut data = Vec::new();
    data.extend_from_slice(&2u16.to_le_bytes());
    data.extend_from_slice(&6u32.to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes());
    data.extend_from_slice(&0xB994039Bu32.to_le_bytes()); // TuningId, a u64
    data.extend_from_slice(&16u32.to_le_bytes());
    data.extend_from_slice(&[1, 2, 3]);

    let err = ObjectDefinitionResource::from_bytes(&KEY, &data).unwrap_err();
    assert_eq!(err, CatalogError::UnexpectedEndOfData { offset: data.len() as u64 });
}
