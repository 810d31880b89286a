#![allow(dead_code)]

/// Builds a WMS 1.3.0 capabilities document whose root layer groups the given
/// leaf titles.
pub fn capabilities_with_titles(titles: &[&str]) -> String {
    let layers: String = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            format!("<Layer queryable=\"1\"><Name>layer_{i}</Name><Title>{title}</Title></Layer>")
        })
        .collect();
    wrap_130(&format!(
        "<Layer><Title>Root</Title><CRS>EPSG:4326</CRS>{layers}</Layer>"
    ))
}

pub fn wrap_130(layers: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<WMS_Capabilities version="1.3.0" xmlns="http://www.opengis.net/wms" xmlns:xlink="http://www.w3.org/1999/xlink">
  <Service><Name>WMS</Name><Title>Test service</Title></Service>
  <Capability>{layers}</Capability>
</WMS_Capabilities>"#
    )
}

pub const NESTED_130: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<WMS_Capabilities version="1.3.0" xmlns="http://www.opengis.net/wms">
  <Service><Name>WMS</Name><Title>Nested</Title></Service>
  <Capability>
    <Layer>
      <Title>Root</Title>
      <CRS>EPSG:4326</CRS>
      <EX_GeographicBoundingBox>
        <westBoundLongitude>-10</westBoundLongitude>
        <eastBoundLongitude>10</eastBoundLongitude>
        <southBoundLatitude>-5</southBoundLatitude>
        <northBoundLatitude>5</northBoundLatitude>
      </EX_GeographicBoundingBox>
      <Layer>
        <Name>transport</Name>
        <Title>Transport</Title>
        <CRS>EPSG:3857</CRS>
        <Layer queryable="1">
          <Name>roads</Name>
          <Title>Roads</Title>
          <Abstract> Major roads </Abstract>
          <KeywordList><Keyword>roads</Keyword><Keyword> transport </Keyword></KeywordList>
          <CRS>EPSG:4326</CRS>
        </Layer>
        <Layer>
          <Name>rail</Name>
          <Title>Rail</Title>
          <EX_GeographicBoundingBox>
            <westBoundLongitude>1</westBoundLongitude>
            <eastBoundLongitude>2</eastBoundLongitude>
            <southBoundLatitude>3</southBoundLatitude>
            <northBoundLatitude>4</northBoundLatitude>
          </EX_GeographicBoundingBox>
        </Layer>
      </Layer>
      <Layer>
        <Name>rivers</Name>
        <Title>Rivers</Title>
      </Layer>
    </Layer>
  </Capability>
</WMS_Capabilities>"#;

pub const NAMELESS_LEAF_130: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<WMS_Capabilities version="1.3.0" xmlns="http://www.opengis.net/wms">
  <Capability>
    <Layer>
      <Title>Root</Title>
      <Layer><Name>a</Name><Title>Alpha</Title></Layer>
      <Layer><Abstract>neither title nor name</Abstract></Layer>
      <Layer><Name>only_name</Name></Layer>
      <Layer><Name>c</Name><Title>Gamma</Title></Layer>
    </Layer>
  </Capability>
</WMS_Capabilities>"#;

pub const PLAIN_111: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<WMT_MS_Capabilities version="1.1.1">
  <Capability>
    <Layer>
      <Title>Root</Title>
      <SRS>EPSG:4326 EPSG:900913</SRS>
      <LatLonBoundingBox minx="-180" miny="-90" maxx="180" maxy="90"/>
      <Layer><Name>coast</Name><Title>Coastline</Title></Layer>
    </Layer>
  </Capability>
</WMT_MS_Capabilities>"#;

pub const SERVICE_EXCEPTION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ServiceExceptionReport version="1.3.0" xmlns="http://www.opengis.net/ogc">
  <ServiceException code="InvalidParameterValue">Unknown service</ServiceException>
</ServiceExceptionReport>"#;

pub const DOCTYPE_111: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<!DOCTYPE WMT_MS_Capabilities SYSTEM "http://schemas.opengis.net/wms/1.1.1/WMS_MS_Capabilities.dtd"
 [
 <!ELEMENT VendorSpecificCapabilities EMPTY>
 ]>
<WMT_MS_Capabilities version="1.1.1" updateSequence="42">
  <Service><Name>OGC:WMS</Name><Title>GeoServer Web Map Service</Title></Service>
  <Capability>
    <Layer>
      <Title>GeoServer Web Map Service</Title>
      <SRS>EPSG:4326</SRS>
      <Layer queryable="1"><Name>topp:states</Name><Title>USA Population</Title></Layer>
      <Layer queryable="0"><Name>tiger:roads</Name><Title>Manhattan roads</Title></Layer>
    </Layer>
  </Capability>
</WMT_MS_Capabilities>"#;

/// ISO-8859-1 bytes whose only encoding hint is the XML declaration.
pub fn latin1_declared() -> Vec<u8> {
    let mut bytes = br#"<?xml version="1.0" encoding="ISO-8859-1"?>
<WMS_Capabilities version="1.3.0" xmlns="http://www.opengis.net/wms">
  <Capability>
    <Layer><Title>Root</Title>
      <Layer><Name>rivers</Name><Title>Rivi"#
        .to_vec();
    bytes.push(0xE8);
    bytes.extend_from_slice(
        br#"res de France</Title></Layer>
    </Layer>
  </Capability>
</WMS_Capabilities>"#,
    );
    bytes
}

/// UTF-16LE with a byte order mark.
pub fn utf16le_with_bom(xml: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in xml.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}
