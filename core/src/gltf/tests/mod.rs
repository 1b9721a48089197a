
/// A `.gltf` document with one embedded buffer:
///
/// - node "root" (translated +10 on X) with child "quad" using mesh 0;
/// - node "empty" without a mesh;
/// - mesh 0: an indexed quad (two triangles, TEXCOORD_0, no normals) with a
///   single morph target moving every vertex +2 on Z, default weight 0.5,
///   plus a LINES primitive that the loader skips.
const QUAD_GLTF: &str = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [ { "name": "main", "nodes": [0, 2] } ],
  "nodes": [
    { "name": "root", "translation": [10.0, 0.0, 0.0], "children": [1] },
    { "name": "quad", "mesh": 0 },
    { "name": "empty" }
  ],
  "meshes": [
    {
      "name": "Quad",
      "weights": [0.5],
      "primitives": [
        {
          "attributes": { "POSITION": 0, "TEXCOORD_0": 1 },
          "indices": 2,
          "mode": 4,
          "targets": [ { "POSITION": 3 } ]
        },
        { "attributes": { "POSITION": 0 }, "mode": 1, "targets": [ { "POSITION": 3 } ] }
      ]
    }
  ],
  "accessors": [
    { "bufferView": 0, "componentType": 5126, "count": 4, "type": "VEC3",
      "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] },
    { "bufferView": 1, "componentType": 5126, "count": 4, "type": "VEC2" },
    { "bufferView": 2, "componentType": 5123, "count": 6, "type": "SCALAR" },
    { "bufferView": 3, "componentType": 5126, "count": 4, "type": "VEC3",
      "min": [0.0, 0.0, 2.0], "max": [0.0, 0.0, 2.0] }
  ],
  "bufferViews": [
    { "buffer": 0, "byteOffset": 0, "byteLength": 48, "target": 34962 },
    { "buffer": 0, "byteOffset": 48, "byteLength": 32, "target": 34962 },
    { "buffer": 0, "byteOffset": 80, "byteLength": 12, "target": 34963 },
    { "buffer": 0, "byteOffset": 92, "byteLength": 48 }
  ],
  "buffers": [
    {
      "byteLength": 140,
      "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAACAPwAAgD8AAAAAAAAAAAAAgD8AAAAAAAAAAAAAAAAAAIA/AAAAAAAAgD8AAIA/AAAAAAAAgD8AAAEAAgAAAAIAAwAAAAAAAAAAAAAAAEAAAAAAAAAAAAAAAEAAAAAAAAAAAAAAAEAAAAAAAAAAAAAAAEA="
    }
  ]
}"#;
