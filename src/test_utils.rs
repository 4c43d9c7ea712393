/// Small OSM XML document covering every record kind: three street nodes
/// with an open way, a closed square way traversed counter-clockwise, and a
/// turn restriction relation. No bounds element, so loads derive the
/// dataset bounds from the nodes.
pub fn get_test_data_osm_xml() -> Vec<&'static str> {
    vec![
        r#"<?xml version="1.0" encoding="UTF-8"?>"#,
        r#"<osm version="0.6" generator="CGImap 0.8.8">"#,
        r#"  <node id="18483373" lat="57.1995635" lon="25.0419124"/>"#,
        r#"  <node id="18483475" lat="57.1455443" lon="24.8581908">"#,
        r#"    <tag k="highway" v="traffic_signals"/>"#,
        r#"  </node>"#,
        r#"  <node id="18483521" lat="57.1485002" lon="24.8561211"/>"#,
        r#"  <node id="100" lat="57.1000000" lon="24.9000000"/>"#,
        r#"  <node id="101" lat="57.1000000" lon="24.9100000"/>"#,
        r#"  <node id="102" lat="57.1100000" lon="24.9100000"/>"#,
        r#"  <node id="103" lat="57.1100000" lon="24.9000000"/>"#,
        r#"  <way id="80944232">"#,
        r#"    <nd ref="18483373"/>"#,
        r#"    <nd ref="18483475"/>"#,
        r#"    <nd ref="18483521"/>"#,
        r#"    <tag k="highway" v="living_street"/>"#,
        r#"    <tag k="name" v="Alūksnes iela"/>"#,
        r#"  </way>"#,
        r#"  <way id="200">"#,
        r#"    <nd ref="100"/>"#,
        r#"    <nd ref="101"/>"#,
        r#"    <nd ref="102"/>"#,
        r#"    <nd ref="103"/>"#,
        r#"    <nd ref="100"/>"#,
        r#"    <tag k="building" v="yes"/>"#,
        r#"  </way>"#,
        r#"  <relation id="14385700">"#,
        r#"    <member type="way" ref="80944232" role="from"/>"#,
        r#"    <member type="node" ref="18483475" role="via"/>"#,
        r#"    <member type="way" ref="80944232" role="to"/>"#,
        r#"    <tag k="restriction" v="no_u_turn"/>"#,
        r#"    <tag k="type" v="restriction"/>"#,
        r#"  </relation>"#,
        r#"</osm>"#,
    ]
}
